pub mod columns;
pub mod convert;
pub mod csv_io;
pub mod fill;
pub mod prune;
pub mod schema;
pub mod slug;
pub mod utils;

use crate::error::Result;
use std::{path::PathBuf, time::Instant};
use tracing::{info, instrument};

pub const DEFAULT_INPUT: &str = "./data/ADEME_dpe-v2-tertiaire-2.csv";
pub const DEFAULT_OUTPUT: &str = "./data/ademe_english.csv";

/// Where to read, where to write, and which slugs to drop / cast.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub drop_columns: Vec<String>,
    pub int_columns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            drop_columns: columns::DROP_COLUMNS.iter().map(|s| s.to_string()).collect(),
            int_columns: columns::INT_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub input_columns: usize,
    pub output_columns: usize,
    pub dropped: usize,
    pub coerced: usize,
}

/// Loaded → Renamed → Dropped → Filled → Coerced → Saved.
///
/// Stops at the first failing stage; the output file is only touched once
/// every earlier stage has succeeded.
#[instrument(
    level = "info",
    skip(config),
    fields(input = %config.input.display(), output = %config.output.display())
)]
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let start = Instant::now();
    info!("starting transform");

    let loaded = csv_io::load(&config.input)?;
    let renamed = columns::rename_and_slugify(&loaded)?;
    let pruned = prune::drop_columns(&renamed, &config.drop_columns)?;
    let filled = fill::fill_missing(&pruned)?;
    let coerced = convert::coerce_int(&filled, &config.int_columns)?;
    csv_io::save(&coerced, &config.output)?;

    let summary = RunSummary {
        rows: coerced.num_rows(),
        input_columns: loaded.num_columns(),
        output_columns: coerced.num_columns(),
        dropped: loaded.num_columns() - coerced.num_columns(),
        coerced: config.int_columns.len(),
    };
    info!(?summary, elapsed = ?start.elapsed(), "completed");
    Ok(summary)
}
