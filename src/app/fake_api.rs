//! In-memory [`ConverterApi`] used by tests

use crate::api::ConverterApi;
use crate::error::{ClientError, ClientResult};
use crate::types::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Units(Category),
    Convert(ConvertRequest),
    Batch(BatchConvertRequest),
    Health,
}

/// Records every call. Conversions echo the input value unless a canned
/// response is configured; `hanging` makes every call wait forever.
#[derive(Default)]
pub struct FakeApi {
    units: HashMap<&'static str, Vec<Unit>>,
    convert_response: Option<ClientResult<ConvertResponse>>,
    batch_response: Option<ClientResult<BatchConvertResponse>>,
    health: Option<ClientResult<()>>,
    hang: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, category: Category, units: Vec<Unit>) -> Self {
        self.units.insert(category.as_str(), units);
        self
    }

    pub fn with_convert(mut self, response: ClientResult<ConvertResponse>) -> Self {
        self.convert_response = Some(response);
        self
    }

    pub fn with_batch(mut self, response: ClientResult<BatchConvertResponse>) -> Self {
        self.batch_response = Some(response);
        self
    }

    pub fn with_health(mut self, response: ClientResult<()>) -> Self {
        self.health = Some(response);
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if self.hang {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl ConverterApi for FakeApi {
    async fn fetch_units(&self, category: Category) -> ClientResult<Vec<Unit>> {
        self.record(Call::Units(category)).await;
        self.units
            .get(category.as_str())
            .cloned()
            .ok_or_else(|| ClientError::Status("HTTP 404 Not Found".into()))
    }

    async fn convert(&self, request: &ConvertRequest) -> ClientResult<ConvertResponse> {
        self.record(Call::Convert(request.clone())).await;
        match &self.convert_response {
            Some(response) => response.clone(),
            None => Ok(ConvertResponse {
                success: true,
                result: request.value,
                original_value: request.value,
                from_unit: request.from_unit.clone(),
                to_unit: request.to_unit.clone(),
            }),
        }
    }

    async fn convert_batch(&self, request: &BatchConvertRequest) -> ClientResult<BatchConvertResponse> {
        self.record(Call::Batch(request.clone())).await;
        match &self.batch_response {
            Some(response) => response.clone(),
            None => Ok(BatchConvertResponse {
                success: true,
                original_value: request.value,
                from_unit: request.from_unit.clone(),
                results: Vec::new(),
                failed_units: None,
            }),
        }
    }

    async fn health(&self) -> ClientResult<()> {
        self.record(Call::Health).await;
        self.health.clone().unwrap_or(Ok(()))
    }
}
