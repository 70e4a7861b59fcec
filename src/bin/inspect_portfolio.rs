use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::{env, fs::File, path::Path, process::exit};

/// Rows printed after the schema.
const PREVIEW_ROWS: usize = 5;

fn main() {
    // Expect exactly one CLI argument: path to a portfolio Parquet file.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <composicao_*.parquet>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect_portfolio(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Print the file's row count, embedded column types and the first rows.
fn inspect_portfolio(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("reading Parquet footer of {}", path.display()))?;

    let total_rows = builder.metadata().file_metadata().num_rows();
    let schema = builder.schema().clone();

    println!("=== Portfolio file: {} ===", path.display());
    println!("Rows:    {}", total_rows);
    println!("Columns: {}", schema.fields().len());
    println!();

    println!("=== Schema ===");
    for field in schema.fields() {
        println!("- {:<20} | {}", field.name(), field.data_type());
    }
    println!();

    let reader = builder
        .with_batch_size(PREVIEW_ROWS)
        .build()
        .context("building record batch reader")?;

    println!("=== First {} rows ===", PREVIEW_ROWS);
    let header: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    println!("{}", header.join(" | "));

    let mut printed = 0;
    for batch in reader {
        let batch = batch.context("decoding record batch")?;
        printed += print_rows(&batch, PREVIEW_ROWS - printed)?;
        if printed >= PREVIEW_ROWS {
            break;
        }
    }

    Ok(())
}

/// Print up to `limit` rows of `batch`, returning how many were printed.
fn print_rows(batch: &RecordBatch, limit: usize) -> Result<usize> {
    let options = FormatOptions::default().with_null("");
    let formatters = batch
        .columns()
        .iter()
        .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
        .collect::<Result<Vec<_>, _>>()
        .context("formatting columns")?;

    let rows = batch.num_rows().min(limit);
    for row in 0..rows {
        let cells: Vec<String> = formatters.iter().map(|f| f.value(row).to_string()).collect();
        println!("{}", cells.join(" | "));
    }
    Ok(rows)
}
