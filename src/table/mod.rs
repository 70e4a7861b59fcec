// src/table/mod.rs

pub mod arrow;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub use self::arrow::{build_arrow_schema, infer_column_type, to_record_batch};

pub const TRADE_DATE_COLUMN: &str = "trade_date";

/// Column under which a non-object entry of `results` is kept.
pub const SCALAR_COLUMN: &str = "value";

/// One constituent exactly as the source described it, plus `trade_date`.
pub type ConstituentRecord = Map<String, Value>;

/// The day's portfolio: rows in source order, columns in first-seen order,
/// `trade_date` always last.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituentTable {
    columns: Vec<String>,
    rows: Vec<ConstituentRecord>,
    trade_date: NaiveDate,
}

impl ConstituentTable {
    /// Build the table from the `results` array and stamp every row with `trade_date`.
    pub fn from_results(results: Vec<Value>, trade_date: NaiveDate) -> Self {
        let stamp = Value::String(trade_date.format("%Y-%m-%d").to_string());
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(results.len());

        for (idx, item) in results.into_iter().enumerate() {
            let mut record = match item {
                Value::Object(map) => map,
                other => {
                    warn!(row = idx, "constituent is not an object, keeping it as `{}`", SCALAR_COLUMN);
                    let mut map = Map::new();
                    map.insert(SCALAR_COLUMN.to_string(), other);
                    map
                }
            };

            // The source's own `trade_date`, if any, is replaced by ours.
            record.shift_remove(TRADE_DATE_COLUMN);
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            record.insert(TRADE_DATE_COLUMN.to_string(), stamp.clone());
            rows.push(record);
        }
        columns.push(TRADE_DATE_COLUMN.to_string());

        info!(
            rows = rows.len(),
            columns = columns.len(),
            "table built with {} rows and {} columns",
            rows.len(),
            columns.len()
        );

        Self {
            columns,
            rows,
            trade_date,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ConstituentRecord] {
        &self.rows
    }

    pub fn trade_date(&self) -> NaiveDate {
        self.trade_date
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every value of `column`, `Null` where a row lacks the key.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&Value::Null))
    }

    /// Log the first `n` rows at debug level.
    pub fn log_preview(&self, n: usize) {
        for (idx, row) in self.rows.iter().take(n).enumerate() {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| format!("{}={}", c, render_cell(row.get(c).unwrap_or(&Value::Null))))
                .collect();
            debug!(row = idx, "{}", cells.join(" | "));
        }
    }
}

/// Text form of a cell: strings verbatim, scalars via their JSON spelling,
/// nested values as compact JSON, `None` for null.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn render_cell(value: &Value) -> String {
    cell_text(value).unwrap_or_default()
}
