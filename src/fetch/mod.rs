// src/fetch/mod.rs

pub mod portfolio;
pub mod request;

pub use portfolio::{extract_results, fetch_constituents};
pub use request::{encode_payload, PortfolioRequest, BROWSER_USER_AGENT};
