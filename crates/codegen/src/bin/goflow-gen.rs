//! goflow-gen — regenerates the job dispatch source.
//!
//! Run with no arguments from the project root before building: scans
//! `./jobs` for `*_job*` files and writes `./flow.rs`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use goflow_codegen::config::{
    DEFAULT_DIRECTIVE, DEFAULT_FILE_MARKER, DEFAULT_JOBS_DIR, DEFAULT_JOBS_MODULE,
    DEFAULT_JOB_TYPE, DEFAULT_OUTPUT,
};
use goflow_codegen::{Generator, GeneratorConfig, ScanStatus};

// ── CLI ─────────────────────────────────────────────────────────────

/// Generate the `select_job` dispatch function from marker comments in job files.
#[derive(Parser, Debug)]
#[command(name = "goflow-gen", version, about)]
struct Cli {
    /// Directory scanned for job files.
    #[arg(long, env = "GOFLOW_JOBS_DIR", default_value = DEFAULT_JOBS_DIR)]
    jobs_dir: PathBuf,

    /// Generated file path.
    #[arg(long, env = "GOFLOW_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Substring a file name must contain to be scanned for a marker.
    #[arg(long, env = "GOFLOW_FILE_MARKER", default_value = DEFAULT_FILE_MARKER)]
    file_marker: String,

    /// Marker comment keyword.
    #[arg(long, env = "GOFLOW_DIRECTIVE", default_value = DEFAULT_DIRECTIVE)]
    directive: String,

    /// Path of the job type returned by constructors.
    #[arg(long, env = "GOFLOW_JOB_TYPE", default_value = DEFAULT_JOB_TYPE)]
    job_type: String,

    /// Path of the module containing the job files.
    #[arg(long, env = "GOFLOW_JOBS_MODULE", default_value = DEFAULT_JOBS_MODULE)]
    jobs_module: String,

    /// Exit non-zero if the generated file is out of date instead of writing it.
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn into_config(self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_jobs_dir(self.jobs_dir)
            .with_output(self.output)
            .with_file_marker(self.file_marker)
            .with_directive(self.directive)
            .with_job_type(self.job_type)
            .with_jobs_module(self.jobs_module)
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let check = cli.check;
    let config = cli.into_config();
    config.log_summary();

    let generator = Generator::new(config).context("failed to initialise generator")?;

    if check {
        let rendered = generator.check()?;
        info!(jobs = rendered.table.len(), "generated file is up to date");
        return Ok(());
    }

    let report = generator
        .run()
        .with_context(|| format!("failed to generate from {}", generator.config().jobs_dir.display()))?;

    let skipped = report
        .results
        .iter()
        .filter(|r| matches!(r.status, ScanStatus::Skipped { .. }))
        .count();
    info!(
        jobs = report.table.len(),
        skipped,
        path = %report.output.display(),
        outcome = ?report.outcome,
        "done"
    );

    Ok(())
}
