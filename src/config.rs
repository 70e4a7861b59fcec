// src/config.rs

use anyhow::{Context, Result};
use std::{env, path::PathBuf};
use url::Url;

/// B3 endpoint serving the daily theoretical portfolio of an index.
pub const DEFAULT_BASE_URL: &str =
    "https://sistemaswebb3-listados.b3.com.br/indexProxy/indexCall/GetPortfolioDay/";
pub const DEFAULT_INDEX: &str = "IBOV";
pub const DEFAULT_LANGUAGE: &str = "pt-br";

/// Everything a run needs to know. `Default` is the production setup;
/// `from_env` lets the same binary point elsewhere without flags.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub base_url: Url,
    pub index: String,
    pub language: String,
    pub output_dir: PathBuf,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL should parse"),
            index: DEFAULT_INDEX.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl PortfolioConfig {
    /// Defaults, overridden by `B3_PORTFOLIO_URL`, `B3_INDEX`, `B3_LANGUAGE`
    /// and `B3_OUTPUT_DIR` when set and non-empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(raw) = get("B3_PORTFOLIO_URL") {
            cfg.base_url = parse_base_url(&raw)?;
        }
        if let Some(index) = get("B3_INDEX") {
            cfg.index = index.trim().to_ascii_uppercase();
        }
        if let Some(language) = get("B3_LANGUAGE") {
            cfg.language = language.trim().to_string();
        }
        if let Some(dir) = get("B3_OUTPUT_DIR") {
            cfg.output_dir = PathBuf::from(dir);
        }

        Ok(cfg)
    }

    /// `composicao_<index>_<YYYY-MM-DD>`, without extension.
    pub fn base_file_name(&self, trade_date: chrono::NaiveDate) -> String {
        format!(
            "composicao_{}_{}",
            self.index.to_ascii_lowercase(),
            trade_date.format("%Y-%m-%d")
        )
    }
}

/// The payload is appended as the last path segment, so the base must end with `/`.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("parsing base URL {}", raw))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
