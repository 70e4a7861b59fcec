// src/persist/mod.rs

pub mod csv;
pub mod parquet;

use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

use crate::error::WriteError;
use crate::table::{to_record_batch, ConstituentTable};

pub use self::csv::{write_csv, UTF8_BOM};
pub use self::parquet::write_parquet;

/// Final locations of the two artifacts for one base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub csv: PathBuf,
    pub parquet: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, base_name: &str) -> Self {
        Self {
            csv: dir.join(format!("{}.csv", base_name)),
            parquet: dir.join(format!("{}.parquet", base_name)),
        }
    }
}

/// What the persister did. Each format is reported on its own.
#[derive(Debug)]
pub enum PersistOutcome {
    NothingToPersist,
    Attempted {
        csv: Result<PathBuf, WriteError>,
        parquet: Result<PathBuf, WriteError>,
    },
}

impl PersistOutcome {
    /// Paths that were actually written.
    pub fn written(&self) -> Vec<&Path> {
        match self {
            PersistOutcome::NothingToPersist => Vec::new(),
            PersistOutcome::Attempted { csv, parquet } => [csv, parquet]
                .into_iter()
                .filter_map(|r| r.as_ref().ok().map(PathBuf::as_path))
                .collect(),
        }
    }

    pub fn errors(&self) -> Vec<&WriteError> {
        match self {
            PersistOutcome::NothingToPersist => Vec::new(),
            PersistOutcome::Attempted { csv, parquet } => [csv, parquet]
                .into_iter()
                .filter_map(|r| r.as_ref().err())
                .collect(),
        }
    }
}

/// Write `table` as `<base_name>.csv` and `<base_name>.parquet` under `dir`.
///
/// An absent or empty table writes nothing. A failure on one format is
/// logged and does not stop the other.
#[instrument(level = "info", skip(table, dir), fields(dir = %dir.display()))]
pub fn persist_table(
    table: Option<&ConstituentTable>,
    dir: &Path,
    base_name: &str,
) -> PersistOutcome {
    let table = match table {
        Some(t) if !t.is_empty() => t,
        _ => {
            info!("table is empty, no files will be saved");
            return PersistOutcome::NothingToPersist;
        }
    };

    let paths = ArtifactPaths::new(dir, base_name);

    let (csv, parquet) = match to_record_batch(table) {
        Ok(batch) => (
            write_csv(&batch, &paths.csv).map(|()| paths.csv.clone()),
            write_parquet(&batch, &paths.parquet).map(|()| paths.parquet.clone()),
        ),
        Err(e) => (
            Err(WriteError::Batch {
                path: paths.csv.clone(),
                reason: e.to_string(),
            }),
            Err(WriteError::Batch {
                path: paths.parquet.clone(),
                reason: e.to_string(),
            }),
        ),
    };

    for result in [&csv, &parquet] {
        match result {
            Ok(path) => info!(path = %path.display(), "file saved"),
            Err(e) => error!(path = %e.path().display(), "failed to save file: {}", e),
        }
    }

    PersistOutcome::Attempted { csv, parquet }
}
