// src/error.rs

use reqwest::StatusCode;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Why the fetch stage produced no constituents. Every variant ends the run
/// without writing files.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("response body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`results` holds {found}, expected an array of constituents")]
    UnexpectedShape { found: &'static str },

    #[error("`results` is missing or empty")]
    EmptyResult,
}

impl FetchError {
    /// The source answered correctly but had nothing to report.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, FetchError::EmptyResult)
    }
}

/// Failure to produce one of the two output files.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding {path} as CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("encoding {path} as Parquet: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("building record batch for {path}: {reason}")]
    Batch { path: PathBuf, reason: String },
}

impl WriteError {
    pub fn path(&self) -> &PathBuf {
        match self {
            WriteError::Io { path, .. }
            | WriteError::Csv { path, .. }
            | WriteError::Parquet { path, .. }
            | WriteError::Batch { path, .. } => path,
        }
    }
}
