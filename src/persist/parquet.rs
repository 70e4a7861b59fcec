// src/persist/parquet.rs

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

use crate::error::WriteError;

/// Write `batch` as a single Snappy-compressed Parquet file with the Arrow
/// schema embedded.
pub fn write_parquet(batch: &RecordBatch, out_path: &Path) -> Result<(), WriteError> {
    let temp_path = out_path.with_extension("parquet.tmp");
    let result = write_parquet_inner(batch, &temp_path).and_then(|()| {
        fs::rename(&temp_path, out_path).map_err(|source| WriteError::Io {
            path: out_path.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_parquet_inner(batch: &RecordBatch, path: &Path) -> Result<(), WriteError> {
    let pq_err = |source| WriteError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_dictionary_enabled(true)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(pq_err)?;
    writer.write(batch).map_err(pq_err)?;
    writer.close().map_err(pq_err)?;
    debug!(path = %path.display(), rows = batch.num_rows(), "wrote Parquet rows");
    Ok(())
}
