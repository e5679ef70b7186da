//! HTTP client for the conversion backend

use crate::constants::{FALLBACK_BATCH, FALLBACK_CONVERT};
use crate::error::{ClientError, ClientResult};
use crate::types::*;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Remote operations the converter UI depends on.
///
/// The desktop app talks to [`HttpApi`]; tests plug in an in-memory fake.
#[async_trait]
pub trait ConverterApi: Send + Sync {
    async fn fetch_units(&self, category: Category) -> ClientResult<Vec<Unit>>;

    async fn convert(&self, request: &ConvertRequest) -> ClientResult<ConvertResponse>;

    async fn convert_batch(&self, request: &BatchConvertRequest) -> ClientResult<BatchConvertResponse>;

    async fn health(&self) -> ClientResult<()>;
}

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("metrix/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ConverterApi for HttpApi {
    async fn fetch_units(&self, category: Category) -> ClientResult<Vec<Unit>> {
        let url = self.endpoint(&format!("/api/units/{}", category.as_str()));
        debug!(url = %url, "Fetching units");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_units(status, &body)
    }

    async fn convert(&self, request: &ConvertRequest) -> ClientResult<ConvertResponse> {
        let url = self.endpoint("/api/convert");
        debug!(url = %url, value = request.value, from = %request.from_unit, to = %request.to_unit, "Requesting conversion");
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        interpret_outcome(status, &body, FALLBACK_CONVERT)
    }

    async fn convert_batch(&self, request: &BatchConvertRequest) -> ClientResult<BatchConvertResponse> {
        let url = self.endpoint("/api/convert/batch");
        debug!(url = %url, value = request.value, from = %request.from_unit, "Requesting batch conversion");
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        interpret_outcome(status, &body, FALLBACK_BATCH)
    }

    async fn health(&self) -> ClientResult<()> {
        let url = self.endpoint("/health");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_health(status, &body)
    }
}

fn status_error(status: StatusCode) -> ClientError {
    ClientError::Status(format!("HTTP {}", status))
}

/// Unit list: any non-2xx status is a failure regardless of body.
pub fn parse_units(status: StatusCode, body: &str) -> ClientResult<Vec<Unit>> {
    if !status.is_success() {
        return Err(status_error(status));
    }
    let parsed: UnitsResponse = serde_json::from_str(body)?;
    Ok(parsed.units)
}

/// Conversion outcome: a failure when the status is non-2xx or the body's
/// `success` flag is not true. The server's message is preferred over `fallback`.
pub fn interpret_outcome<T: DeserializeOwned>(status: StatusCode, body: &str, fallback: &str) -> ClientResult<T> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) if !status.is_success() => return Err(status_error(status)),
        Err(e) => return Err(e.into()),
    };

    let success = value.get("success").and_then(|s| s.as_bool()).unwrap_or(false);
    if !status.is_success() || !success {
        let message = server_message(&value).unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::Rejected(message));
    }

    Ok(serde_json::from_value(value)?)
}

/// Extract an error message from `error`, or from a FastAPI-style `detail`
/// (plain string, or a list of validation entries with `msg`).
fn server_message(value: &serde_json::Value) -> Option<String> {
    if let Some(msg) = value.get("error").and_then(|e| e.as_str()).filter(|s| !s.is_empty()) {
        return Some(msg.to_string());
    }
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

pub fn parse_health(status: StatusCode, body: &str) -> ClientResult<()> {
    if !status.is_success() {
        return Err(status_error(status));
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value.get("status").and_then(|s| s.as_str()) {
        Some("healthy") => Ok(()),
        Some(other) => Err(ClientError::Rejected(format!("backend reports {}", other))),
        None => Err(ClientError::Decode("missing status field".into())),
    }
}
