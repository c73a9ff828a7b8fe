use crate::error::{Result, TransformError};
use arrow::{
    array::ArrayRef,
    datatypes::SchemaRef,
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::path::{Path, PathBuf};

/// Position of `name` in the batch schema, or `MissingColumn`.
pub fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(name)
        .map_err(|_| TransformError::MissingColumn(name.to_string()))
}

/// Reassemble a batch, keeping the row count even when no columns remain.
pub fn rebuild_batch(
    schema: SchemaRef,
    columns: Vec<ArrayRef>,
    num_rows: usize,
) -> Result<RecordBatch> {
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    RecordBatch::try_new_with_options(schema, columns, &options).map_err(Into::into)
}

/// `data/out.csv` → `data/out.csv.tmp`
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

pub fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> TransformError {
    let path = path.to_path_buf();
    move |source| TransformError::Io { path, source }
}
