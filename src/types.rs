//! Common types and data structures

use crate::utils::format_number;
use serde::{Deserialize, Serialize};

/// Measurement category offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Length,
    Weight,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Length, Category::Weight, Category::Temperature];

    /// Path segment and request field value
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
        }
    }
}

/// Unit entry from `GET /api/units/{category}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UnitsResponse {
    pub units: Vec<Unit>,
}

/// Body of `POST /api/convert`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub category: Category,
}

/// Body of `POST /api/convert/batch`. Omitting target units means "all units".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchConvertRequest {
    pub value: f64,
    pub from_unit: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub result: f64,
    pub original_value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchItem {
    pub to_unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchConvertResponse {
    pub success: bool,
    pub original_value: f64,
    pub from_unit: String,
    pub results: Vec<BatchItem>,
    #[serde(default)]
    pub failed_units: Option<Vec<String>>,
}

/// Backend reachability as reported by `GET /health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

/// Single conversion ready for display, names already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SingleResult {
    pub original_value: f64,
    pub from_name: String,
    pub result: f64,
    pub to_name: String,
}

impl SingleResult {
    pub fn headline(&self) -> String {
        format!("{} {}", format_number(self.result), self.to_name)
    }

    pub fn detail(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_number(self.original_value),
            self.from_name,
            format_number(self.result),
            self.to_name
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub unit_name: String,
    pub value: f64,
}

/// Batch conversion ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub original_value: f64,
    pub from_name: String,
    pub rows: Vec<BatchRow>,
    pub failed_units: Vec<String>,
}

impl BatchResult {
    pub fn header(&self) -> String {
        format!(
            "{} {} converted to other units:",
            format_number(self.original_value),
            self.from_name
        )
    }

    /// Warning line, present only when some target units failed
    pub fn warning(&self) -> Option<String> {
        if self.failed_units.is_empty() {
            None
        } else {
            Some(format!(
                "{}: {}",
                crate::constants::MSG_BATCH_WARNING,
                self.failed_units.join(", ")
            ))
        }
    }
}

/// What the output area shows. At most one panel is visible at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Display {
    #[default]
    Idle,
    Loading,
    Result(SingleResult),
    BatchResult(BatchResult),
    Error(String),
}

#[cfg(test)]
impl Display {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Display::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
