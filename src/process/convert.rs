use crate::error::{Result, TransformError};
use crate::process::utils::{column_index, rebuild_batch};
use arrow::{
    array::{Array, ArrayRef, AsArray, Int64Array},
    datatypes::{DataType, Field, Float64Type, Int64Type, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Cast the named columns to `Int64`. Every cell must hold a whole number;
/// nothing is rounded or truncated.
pub fn coerce_int<S: AsRef<str>>(batch: &RecordBatch, names: &[S]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut cols: Vec<ArrayRef> = batch.columns().to_vec();

    for name in names {
        let name = name.as_ref();
        let idx = column_index(batch, name)?;
        debug!(column = %name, from = %cols[idx].data_type(), "coercing to Int64");
        let ints = to_int64(name, &cols[idx])?;
        fields[idx] = Field::new(name, DataType::Int64, false);
        cols[idx] = Arc::new(ints);
    }

    let out = rebuild_batch(Arc::new(Schema::new(fields)), cols, batch.num_rows())?;
    info!(columns = names.len(), "coerced integer columns");
    Ok(out)
}

fn to_int64(column: &str, arr: &ArrayRef) -> Result<Int64Array> {
    let not_integer = |row: usize, value: String| TransformError::NotInteger {
        column: column.to_string(),
        row,
        value,
    };

    let values: Vec<i64> = match arr.data_type() {
        DataType::Int64 => arr
            .as_primitive::<Int64Type>()
            .iter()
            .enumerate()
            .map(|(row, v)| v.ok_or_else(|| not_integer(row, "null".into())))
            .collect::<Result<_>>()?,
        DataType::Float64 => arr
            .as_primitive::<Float64Type>()
            .iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(f) => whole_f64(f).ok_or_else(|| not_integer(row, f.to_string())),
                None => Err(not_integer(row, "null".into())),
            })
            .collect::<Result<_>>()?,
        DataType::Utf8 => arr
            .as_string::<i32>()
            .iter()
            .enumerate()
            .map(|(row, v)| match v {
                Some(s) => parse_whole(s).ok_or_else(|| not_integer(row, s.to_string())),
                None => Err(not_integer(row, "null".into())),
            })
            .collect::<Result<_>>()?,
        DataType::Null if arr.is_empty() => Vec::new(),
        _ => return Err(not_integer(0, format!("<{}>", arr.data_type()))),
    };

    Ok(Int64Array::from(values))
}

/// Whole, finite and inside the `i64` range.
fn whole_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_whole(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(whole_f64))
}
