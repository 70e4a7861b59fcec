// src/table/arrow.rs

use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::sync::Arc;

use super::{cell_text, ConstituentTable};

/// Infer an Arrow DataType from the non-null values of one column.
///
/// - all booleans                 → Boolean
/// - all integers fitting an i64  → Int64
/// - all numbers                  → Float64
/// - anything else, or all null   → Utf8
pub fn infer_column_type<'a, I>(values: I) -> DataType
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut inferred: Option<DataType> = None;

    for value in values {
        let current = match value {
            Value::Null => continue,
            Value::Bool(_) => DataType::Boolean,
            Value::Number(n) if n.is_i64() => DataType::Int64,
            Value::Number(_) => DataType::Float64,
            Value::String(_) | Value::Array(_) | Value::Object(_) => return DataType::Utf8,
        };

        inferred = Some(match (inferred, current) {
            (None, dt) => dt,
            (Some(prev), dt) if prev == dt => prev,
            (Some(DataType::Int64), DataType::Float64) | (Some(DataType::Float64), DataType::Int64) => {
                DataType::Float64
            }
            _ => return DataType::Utf8,
        });
    }

    inferred.unwrap_or(DataType::Utf8)
}

/// Build an ArrowSchema (inside an Arc) with one nullable field per table column.
pub fn build_arrow_schema(table: &ConstituentTable) -> Arc<ArrowSchema> {
    let fields: Vec<ArrowField> = table
        .columns()
        .iter()
        .map(|name| {
            let dt = infer_column_type(table.column_values(name));
            ArrowField::new(name, dt, /* nullable = */ true)
        })
        .collect();

    Arc::new(ArrowSchema::new(fields))
}

/// Materialise the whole table as a single RecordBatch.
pub fn to_record_batch(table: &ConstituentTable) -> Result<RecordBatch, ArrowError> {
    let schema = build_arrow_schema(table);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let values = table.column_values(field.name());
        let array: ArrayRef = match field.data_type() {
            DataType::Boolean => {
                let mut b = BooleanBuilder::with_capacity(table.len());
                for v in values {
                    b.append_option(v.as_bool());
                }
                Arc::new(b.finish())
            }
            DataType::Int64 => {
                let mut b = Int64Builder::with_capacity(table.len());
                for v in values {
                    b.append_option(v.as_i64());
                }
                Arc::new(b.finish())
            }
            DataType::Float64 => {
                let mut b = Float64Builder::with_capacity(table.len());
                for v in values {
                    b.append_option(v.as_f64());
                }
                Arc::new(b.finish())
            }
            _ => {
                let mut b = StringBuilder::new();
                for v in values {
                    b.append_option(cell_text(v));
                }
                Arc::new(b.finish())
            }
        };
        columns.push(array);
    }

    RecordBatch::try_new(schema, columns)
}
