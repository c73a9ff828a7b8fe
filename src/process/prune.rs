use crate::error::Result;
use crate::process::utils::column_index;
use arrow::record_batch::RecordBatch;
use std::collections::HashSet;
use tracing::{debug, info};

/// Remove the named columns. Every name must be present; nothing else goes.
pub fn drop_columns<S: AsRef<str>>(batch: &RecordBatch, names: &[S]) -> Result<RecordBatch> {
    let mut dropped = HashSet::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        column_index(batch, name)?;
        dropped.insert(name);
    }

    let keep: Vec<usize> = batch
        .schema()
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| !dropped.contains(f.name().as_str()))
        .map(|(i, _)| i)
        .collect();

    for name in &dropped {
        debug!(column = %name, "dropping column");
    }
    let pruned = batch.project(&keep)?;
    info!(
        dropped = batch.num_columns() - pruned.num_columns(),
        remaining = pruned.num_columns(),
        "dropped columns"
    );
    Ok(pruned)
}
