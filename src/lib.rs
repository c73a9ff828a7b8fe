//! Cleans the ADEME tertiary-building DPE export into an English-labelled CSV.
//!
//! The whole job is one linear batch over a single Arrow `RecordBatch`:
//! load → rename + slugify → drop → fill → coerce → save.

pub mod error;
pub mod process;

pub use error::{Result, TransformError};
pub use process::{run, PipelineConfig, RunSummary};
