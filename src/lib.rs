pub mod config;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod pipeline;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::PortfolioConfig;
pub use error::{FetchError, WriteError};
pub use pipeline::{run_once, RunOutcome};
