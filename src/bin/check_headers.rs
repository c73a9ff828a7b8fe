use ademe::{
    process::{
        columns::{plan_columns, ColumnPlan},
        csv_io::read_headers,
    },
    PipelineConfig,
};
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Dry run over the input header: shows `source -> English -> slug` for each
/// column and reports anything the transform would reject.
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = PipelineConfig::default();
    let headers = read_headers(&config.input)
        .with_context(|| format!("reading header of {}", config.input.display()))?;

    let mut problems = 0;
    let mut slugs = HashSet::new();
    for plan in plan_columns(&headers) {
        match plan {
            ColumnPlan::Mapped {
                source,
                english,
                slug,
            } => {
                println!("{source} -> {english} -> {slug}");
                slugs.insert(slug);
            }
            ColumnPlan::Unmapped { source } => {
                warn!(column = %source, "no entry in column mapping");
                problems += 1;
            }
        }
    }

    for name in config.drop_columns.iter().chain(&config.int_columns) {
        if !slugs.contains(name) {
            warn!(column = %name, "expected column not present after renaming");
            problems += 1;
        }
    }

    if problems > 0 {
        bail!("{} header problem(s) in {}", problems, config.input.display());
    }
    info!(columns = headers.len(), "all headers mapped");
    Ok(())
}
