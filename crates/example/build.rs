use std::path::PathBuf;

use anyhow::Context;
use goflow_codegen::{Generator, GeneratorConfig};

fn main() -> anyhow::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR not set")?);

    let config = GeneratorConfig::default()
        .with_jobs_dir("src/jobs")
        .with_output(out_dir.join("flow.rs"));

    // Re-run when a job file is added, removed or edited
    println!("cargo:rerun-if-changed=src/jobs");

    Generator::new(config)?.run()?;
    Ok(())
}
