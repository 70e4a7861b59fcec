// src/persist/csv.rs

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::WriteError;

/// UTF-8 byte-order mark; spreadsheet tools use it to pick the encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `batch` as BOM-prefixed, comma-separated UTF-8 with a header row.
///
/// The file is written next to `out_path` first and renamed into place.
pub fn write_csv(batch: &RecordBatch, out_path: &Path) -> Result<(), WriteError> {
    let temp_path = out_path.with_extension("csv.tmp");
    let result = write_csv_inner(batch, &temp_path).and_then(|()| {
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

fn write_csv_inner(batch: &RecordBatch, path: &Path) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM).map_err(io_err)?;

    let mut writer = WriterBuilder::new().with_header(true).build(out);
    writer.write(batch).map_err(|source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut out = writer.into_inner();
    out.flush().map_err(io_err)?;
    debug!(path = %path.display(), rows = batch.num_rows(), "wrote CSV rows");
    Ok(())
}
