use crate::error::Result;
use crate::process::utils::rebuild_batch;
use arrow::{
    array::{Array, ArrayRef, AsArray, Float64Array, Int64Array, StringArray},
    datatypes::{DataType, Field, Float64Type, Int64Type, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Replace nulls: `""` in text columns, `0` in numeric ones. A column that
/// held no values at all becomes a `Float64` column of zeros.
pub fn fill_missing(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut cols = Vec::with_capacity(batch.num_columns());
    let mut filled_cells = 0;

    for (field, arr) in schema.fields().iter().zip(batch.columns()) {
        let missing = missing_count(arr);
        let filled = if missing == 0 {
            arr.clone()
        } else {
            debug!(column = %field.name(), missing, "filling nulls");
            filled_cells += missing;
            fill_column(arr)?
        };
        fields.push(Field::new(field.name(), filled.data_type().clone(), false));
        cols.push(filled);
    }

    let out = rebuild_batch(Arc::new(Schema::new(fields)), cols, batch.num_rows())?;
    info!(filled_cells, "filled missing values");
    Ok(out)
}

fn missing_count(arr: &ArrayRef) -> usize {
    match arr.data_type() {
        DataType::Null => arr.len(),
        _ => arr.null_count(),
    }
}

fn fill_column(arr: &ArrayRef) -> Result<ArrayRef> {
    let filled: ArrayRef = match arr.data_type() {
        DataType::Utf8 => Arc::new(StringArray::from_iter_values(
            arr.as_string::<i32>().iter().map(|v| v.unwrap_or("")),
        )),
        DataType::Int64 => Arc::new(Int64Array::from_iter_values(
            arr.as_primitive::<Int64Type>().iter().map(|v| v.unwrap_or(0)),
        )),
        DataType::Float64 => Arc::new(Float64Array::from_iter_values(
            arr.as_primitive::<Float64Type>()
                .iter()
                .map(|v| v.unwrap_or(0.0)),
        )),
        DataType::Null => Arc::new(Float64Array::from(vec![0.0; arr.len()])),
        other => {
            return Err(ArrowError::InvalidArgumentError(format!(
                "cannot fill nulls in column of type {other}"
            ))
            .into())
        }
    };
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::NullArray;

    fn single(name: &str, arr: ArrayRef) -> RecordBatch {
        let schema = Schema::new(vec![Field::new(name, arr.data_type().clone(), true)]);
        RecordBatch::try_new(Arc::new(schema), vec![arr]).unwrap()
    }

    #[test]
    fn test_text_nulls_become_empty_strings() {
        let input = single(
            "residence_name",
            Arc::new(StringArray::from(vec![Some("Les Pins"), None])),
        );
        let out = fill_missing(&input).unwrap();
        let col = out.column(0).as_string::<i32>();
        assert_eq!(col.null_count(), 0);
        assert_eq!(col.value(0), "Les Pins");
        assert_eq!(col.value(1), "");
    }

    #[test]
    fn test_numeric_nulls_become_zero() {
        let ints = single(
            "occupant_count",
            Arc::new(Int64Array::from(vec![None, Some(12)])),
        );
        let out = fill_missing(&ints).unwrap();
        let col = out.column(0).as_primitive::<Int64Type>();
        assert_eq!(col.values().to_vec(), vec![0, 12]);

        let floats = single(
            "usable_area",
            Arc::new(Float64Array::from(vec![Some(80.5), None])),
        );
        let out = fill_missing(&floats).unwrap();
        let col = out.column(0).as_primitive::<Float64Type>();
        assert_eq!(col.values().to_vec(), vec![80.5, 0.0]);
    }

    #[test]
    fn test_all_empty_column_becomes_float_zeros() {
        let input = single("apartment_floor", Arc::new(NullArray::new(3)));
        let out = fill_missing(&input).unwrap();
        assert_eq!(out.column(0).data_type(), &DataType::Float64);
        let col = out.column(0).as_primitive::<Float64Type>();
        assert_eq!(col.values().to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_no_nulls_after_fill() {
        let input = single(
            "dpe_label",
            Arc::new(StringArray::from(vec![None, Some("C"), None])),
        );
        let out = fill_missing(&input).unwrap();
        assert!(out.columns().iter().all(|c| c.null_count() == 0));
        assert!(!out.schema().field(0).is_nullable());
    }
}
