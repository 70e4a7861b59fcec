// src/fetch/request.rs

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::json;
use url::Url;

use crate::config::PortfolioConfig;

/// Desktop Chrome; the endpoint tends to refuse obvious non-browser agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A ready-to-send GET: target URL plus headers.
#[derive(Debug, Clone)]
pub struct PortfolioRequest {
    pub url: Url,
    pub headers: HeaderMap,
}

impl PortfolioRequest {
    pub fn new(base_url: &Url, index: &str, language: &str) -> Self {
        let mut url = base_url.clone();
        let path = format!("{}{}", base_url.path(), encode_payload(index, language));
        url.set_path(&path);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        Self { url, headers }
    }

    pub fn from_config(cfg: &PortfolioConfig) -> Self {
        Self::new(&cfg.base_url, &cfg.index, &cfg.language)
    }
}

/// Base64 of `{"index":..,"language":..}`, the way the B3 web page builds it.
pub fn encode_payload(index: &str, language: &str) -> String {
    let payload = json!({ "index": index, "language": language });
    STANDARD.encode(payload.to_string())
}
