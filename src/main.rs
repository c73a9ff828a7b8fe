use ademe::{run, PipelineConfig};
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load → rename → drop → fill → coerce → save ──────────────
    let config = PipelineConfig::default();
    let summary = run(&config)
        .with_context(|| format!("transforming {}", config.input.display()))?;

    info!(
        rows = summary.rows,
        columns = summary.output_columns,
        output = %config.output.display(),
        "all done"
    );
    Ok(())
}
