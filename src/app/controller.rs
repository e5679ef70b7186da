//! Converter state machine, independent of the GUI toolkit
//!
//! Every request is stamped with a generation number. Starting a newer
//! conversion or switching category supersedes whatever is in flight, and the
//! superseded outcome is dropped when it eventually arrives. The busy flag of
//! a button is only cleared by the outcome of the request that set it.

use crate::constants::*;
use crate::error::ClientResult;
use crate::types::*;
use crate::utils::unit_display_name;
use crate::validation::{validate_batch, validate_single, ValidationError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Single,
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    operation: Operation,
}

/// Unit list fetch to run
#[derive(Debug, Clone, PartialEq)]
pub struct UnitsTicket {
    pub generation: u64,
    pub category: Category,
}

/// Single conversion to run, with the unit list it was issued against
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertTicket {
    pub generation: u64,
    pub request: ConvertRequest,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchTicket {
    pub generation: u64,
    pub request: BatchConvertRequest,
    pub units: Vec<Unit>,
}

/// Why a conversion was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginError {
    Invalid(ValidationError),
    /// Unit list for the current category is still loading
    Busy,
}

/// Result of a background request, posted back to the UI thread
#[derive(Debug)]
pub enum Outcome {
    Units {
        generation: u64,
        result: ClientResult<Vec<Unit>>,
    },
    Converted {
        generation: u64,
        units: Vec<Unit>,
        result: ClientResult<ConvertResponse>,
    },
    BatchConverted {
        generation: u64,
        units: Vec<Unit>,
        result: ClientResult<BatchConvertResponse>,
    },
    Health(HealthStatus),
}

#[derive(Debug, Default)]
pub struct Controller {
    pub category: Category,
    pub units: Vec<Unit>,
    pub from_idx: Option<usize>,
    pub to_idx: Option<usize>,
    pub value_input: String,
    pub display: Display,
    pub health: HealthStatus,
    /// Set when validation wants the value field focused; consumed by the UI
    pub focus_value: bool,
    generation: u64,
    pending_units: Option<u64>,
    pending_conversion: Option<Pending>,
}

impl Controller {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn from_unit(&self) -> Option<&Unit> {
        self.from_idx.and_then(|i| self.units.get(i))
    }

    pub fn to_unit(&self) -> Option<&Unit> {
        self.to_idx.and_then(|i| self.units.get(i))
    }

    pub fn is_loading_units(&self) -> bool {
        self.pending_units.is_some()
    }

    pub fn is_converting(&self) -> bool {
        matches!(self.pending_conversion, Some(p) if p.operation == Operation::Single)
    }

    pub fn is_batch_converting(&self) -> bool {
        matches!(self.pending_conversion, Some(p) if p.operation == Operation::Batch)
    }

    /// Switch category: drop the current unit list, clear output, and
    /// supersede any conversion still in flight.
    pub fn select_category(&mut self, category: Category) -> UnitsTicket {
        info!(category = category.as_str(), "Category selected");
        self.category = category;
        self.units.clear();
        self.from_idx = None;
        self.to_idx = None;
        self.pending_conversion = None;
        self.display = Display::Idle;
        let generation = self.next_generation();
        self.pending_units = Some(generation);
        UnitsTicket { generation, category }
    }

    pub fn begin_convert(&mut self) -> Result<ConvertTicket, BeginError> {
        if self.is_loading_units() {
            return Err(BeginError::Busy);
        }
        let input = validate_single(
            &self.value_input,
            self.from_unit().map(|u| u.code.as_str()),
            self.to_unit().map(|u| u.code.as_str()),
        )
        .map_err(|e| self.reject(e))?;

        let generation = self.start(Operation::Single);
        Ok(ConvertTicket {
            generation,
            request: ConvertRequest {
                value: input.value,
                from_unit: input.from_unit,
                to_unit: input.to_unit,
                category: self.category,
            },
            units: self.units.clone(),
        })
    }

    pub fn begin_batch(&mut self) -> Result<BatchTicket, BeginError> {
        if self.is_loading_units() {
            return Err(BeginError::Busy);
        }
        let input = validate_batch(&self.value_input, self.from_unit().map(|u| u.code.as_str()))
            .map_err(|e| self.reject(e))?;

        let generation = self.start(Operation::Batch);
        Ok(BatchTicket {
            generation,
            request: BatchConvertRequest {
                value: input.value,
                from_unit: input.from_unit,
                category: self.category,
            },
            units: self.units.clone(),
        })
    }

    fn reject(&mut self, err: ValidationError) -> BeginError {
        debug!(error = %err, "Input rejected");
        self.display = Display::Error(err.message().to_string());
        if err.focuses_value() {
            self.focus_value = true;
        }
        BeginError::Invalid(err)
    }

    fn start(&mut self, operation: Operation) -> u64 {
        let generation = self.next_generation();
        self.pending_conversion = Some(Pending { generation, operation });
        self.display = Display::Loading;
        generation
    }

    /// Apply a finished request. Returns false when the outcome was stale.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Units { generation, result } => self.finish_units(generation, result),
            Outcome::Converted { generation, units, result } => {
                if !self.take_pending(generation) {
                    return false;
                }
                self.display = match result {
                    Ok(resp) => Display::Result(SingleResult {
                        original_value: resp.original_value,
                        from_name: unit_display_name(&units, &resp.from_unit),
                        result: resp.result,
                        to_name: unit_display_name(&units, &resp.to_unit),
                    }),
                    Err(e) => {
                        warn!(error = %e, "Conversion failed");
                        Display::Error(format!("{}: {}", PREFIX_CONVERT_FAILED, e))
                    }
                };
                true
            }
            Outcome::BatchConverted { generation, units, result } => {
                if !self.take_pending(generation) {
                    return false;
                }
                self.display = match result {
                    Ok(resp) => Display::BatchResult(BatchResult {
                        original_value: resp.original_value,
                        from_name: unit_display_name(&units, &resp.from_unit),
                        rows: resp
                            .results
                            .iter()
                            .map(|item| BatchRow {
                                unit_name: unit_display_name(&units, &item.to_unit),
                                value: item.value,
                            })
                            .collect(),
                        failed_units: resp.failed_units.unwrap_or_default(),
                    }),
                    Err(e) => {
                        warn!(error = %e, "Batch conversion failed");
                        Display::Error(format!("{}: {}", PREFIX_BATCH_FAILED, e))
                    }
                };
                true
            }
            Outcome::Health(status) => {
                self.health = status;
                true
            }
        }
    }

    fn take_pending(&mut self, generation: u64) -> bool {
        match self.pending_conversion {
            Some(p) if p.generation == generation => {
                self.pending_conversion = None;
                true
            }
            _ => {
                debug!(generation, "Discarding stale conversion response");
                false
            }
        }
    }

    fn finish_units(&mut self, generation: u64, result: ClientResult<Vec<Unit>>) -> bool {
        if self.pending_units != Some(generation) {
            debug!(generation, "Discarding stale unit list");
            return false;
        }
        self.pending_units = None;

        match result {
            Ok(units) => {
                debug!(category = self.category.as_str(), count = units.len(), "Units loaded");
                self.from_idx = if units.is_empty() { None } else { Some(0) };
                self.to_idx = match units.len() {
                    0 => None,
                    1 => Some(0),
                    _ => Some(1),
                };
                self.units = units;
            }
            Err(e) => {
                warn!(category = self.category.as_str(), error = %e, "Failed to load units");
                self.display = Display::Error(format!("{}: {}", PREFIX_UNITS_FAILED, e));
            }
        }
        true
    }
}
