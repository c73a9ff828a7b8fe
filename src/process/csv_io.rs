use crate::error::{Result, TransformError};
use crate::process::{
    schema::table_schema,
    utils::{io_error, tmp_path},
};
use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder, WriterBuilder},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
    sync::Arc,
    time::Instant,
};
use tracing::{debug, info, warn};

fn csv_format() -> Format {
    Format::default()
        .with_header(true)
        .with_delimiter(b',')
        .with_quote(b'"')
}

/// I/O failures stay I/O errors; everything else the CSV layer reports is a
/// parse failure.
fn read_error(path: &Path, err: ArrowError) -> TransformError {
    match err {
        ArrowError::IoError(_, source) => TransformError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => TransformError::Parse {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

/// Header row only, as written in the file.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(io_error(path))?;
    let (schema, _) = csv_format()
        .infer_schema(file, Some(0))
        .map_err(|e| read_error(path, e))?;
    Ok(schema.fields().iter().map(|f| f.name().clone()).collect())
}

/// Read the whole CSV into one batch, inferring column types from every row.
pub fn load(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();

    let file = File::open(path).map_err(io_error(path))?;
    let (inferred, records) = csv_format()
        .infer_schema(file, None)
        .map_err(|e| read_error(path, e))?;
    if inferred.fields().is_empty() {
        return Err(TransformError::Parse {
            path: path.to_path_buf(),
            source: ArrowError::CsvError("no header row".into()),
        });
    }
    debug!(?inferred, records, "inferred schema");

    let schema = Arc::new(table_schema(&inferred));
    let file = File::open(path).map_err(io_error(path))?;
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_delimiter(b',')
        .with_quote(b'"')
        .build(file)
        .map_err(|e| read_error(path, e))?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            warn!(path = %path.display(), error = %e, "CSV parsing failed");
            read_error(path, e)
        })?;
    let table = concat_batches(&schema, &batches)?;

    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        elapsed = ?start.elapsed(),
        "loaded"
    );
    Ok(table)
}

/// Write `batch` with a header row. Goes through `<path>.tmp` and a rename so
/// the destination is either the old file or the complete new one.
pub fn save(batch: &RecordBatch, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let tmp = tmp_path(path);
    if let Err(e) = write_csv(batch, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path).map_err(io_error(path))?;

    info!(
        path = %path.display(),
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "saved"
    );
    Ok(())
}

fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_delimiter(b',')
        .build(BufWriter::new(file));
    writer.write(batch).map_err(|e| match e {
        ArrowError::IoError(_, source) => TransformError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => TransformError::Arrow(other),
    })?;
    writer.into_inner().flush().map_err(io_error(path))
}
