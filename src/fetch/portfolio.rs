// src/fetch/portfolio.rs

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::request::PortfolioRequest;
use crate::error::FetchError;

/// GET the portfolio and hand back the non-empty `results` array.
///
/// One attempt only; the client's default timeout applies.
#[instrument(level = "info", skip_all, fields(url = %request.url))]
pub async fn fetch_constituents(
    client: &Client,
    request: &PortfolioRequest,
) -> Result<Vec<Value>, FetchError> {
    let url = request.url.to_string();

    let resp = client
        .get(request.url.clone())
        .headers(request.headers.clone())
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.clone(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus { url, status });
    }

    let body = resp.bytes().await.map_err(|source| FetchError::Network {
        url: url.clone(),
        source,
    })?;
    debug!(status = %status, bytes = body.len(), "response received");
    info!("data received from the API");

    extract_results(&body)
}

/// Parse a response body and pull out `results`.
///
/// Missing, `null` or `[]` is the empty condition; any other non-array value
/// is treated as a malformed payload.
pub fn extract_results(body: &[u8]) -> Result<Vec<Value>, FetchError> {
    let mut doc: Value = serde_json::from_slice(body)?;

    let results = match doc.get_mut("results") {
        Some(v) => v.take(),
        None => return Err(FetchError::EmptyResult),
    };

    match results {
        Value::Array(items) if items.is_empty() => Err(FetchError::EmptyResult),
        Value::Array(items) => Ok(items),
        Value::Null => Err(FetchError::EmptyResult),
        Value::Bool(_) => Err(FetchError::UnexpectedShape { found: "a boolean" }),
        Value::Number(_) => Err(FetchError::UnexpectedShape { found: "a number" }),
        Value::String(_) => Err(FetchError::UnexpectedShape { found: "a string" }),
        Value::Object(_) => Err(FetchError::UnexpectedShape { found: "an object" }),
    }
}
