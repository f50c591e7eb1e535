use anyhow::Result;
use regprep::{
    pipeline,
    sink::{RowSink, ZipWorkbookSink},
    source::{CsvRowSource, RowSource},
};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_INPUT: &str = "class_registration.csv";
const DEFAULT_OUTPUT: &str = "processed_class_registration.zip";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve input/output paths ───────────────────────────────
    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    info!(%input, %output, "paths resolved");

    // ─── 3) read raw rows ────────────────────────────────────────────
    let rows = CsvRowSource::new(&input).read()?;
    info!(rows = rows.len(), "raw rows read");

    // ─── 4) run the pipeline ─────────────────────────────────────────
    let table = pipeline::run(rows)?;

    // ─── 5) project and export ───────────────────────────────────────
    let projections = pipeline::project::split(&table)?;
    ZipWorkbookSink::new(&output).write(&projections)?;

    info!("all done");
    Ok(())
}
