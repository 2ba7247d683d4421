//! [`Generator`]: one full scan, extract, build, render and write pass.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::{GenError, Result, ScanResult, ScanStatus};
use crate::marker::{CandidateFile, MarkerParser};
use crate::render::FlowRenderer;
use crate::scanner::scan_dir;
use crate::table::DispatchTable;
use crate::writer::{is_current, write_atomic, WriteOutcome};

/// Result of a successful generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// One entry per file in the jobs directory, in scan order.
    pub results: Vec<ScanResult>,
    /// The dispatch table that was rendered.
    pub table: DispatchTable,
    /// Path the source was written to.
    pub output: PathBuf,
    pub outcome: WriteOutcome,
}

/// Rendered source that was not written.
#[derive(Debug)]
pub struct RenderedFlow {
    pub results: Vec<ScanResult>,
    pub table: DispatchTable,
    pub source: String,
}

/// Build-time generator of the job dispatch source.
///
/// Each run starts from scratch: the jobs directory is rescanned and the
/// output is recomputed in full. Any per-file error aborts the run before
/// anything is written.
pub struct Generator {
    config: GeneratorConfig,
    parser: MarkerParser,
    renderer: FlowRenderer,
}

impl Generator {
    /// Compile the marker grammar and the output template.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let parser = MarkerParser::new(&config.file_marker, &config.directive)?;
        let renderer = FlowRenderer::new(&config)?;
        Ok(Self {
            config,
            parser,
            renderer,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scan, render and atomically write the dispatch source.
    pub fn run(&self) -> Result<GenerateReport> {
        let RenderedFlow { results, table, source } = self.render_only()?;
        let outcome = write_atomic(&self.config.output, &source)?;

        info!(
            jobs = table.len(),
            path = %self.config.output.display(),
            outcome = ?outcome,
            "generation complete"
        );

        Ok(GenerateReport {
            results,
            table,
            output: self.config.output.clone(),
            outcome,
        })
    }

    /// Fail with [`GenError::Stale`] if the output differs from a fresh render.
    pub fn check(&self) -> Result<RenderedFlow> {
        let rendered = self.render_only()?;
        if !is_current(&self.config.output, &rendered.source)? {
            return Err(GenError::Stale {
                path: self.config.output.clone(),
            });
        }
        Ok(rendered)
    }

    /// Scan and render without touching the output file.
    pub fn render_only(&self) -> Result<RenderedFlow> {
        let (results, table) = self.build_table()?;
        let source = self.renderer.render(&table)?;
        Ok(RenderedFlow {
            results,
            table,
            source,
        })
    }

    /// Scan the jobs directory and assemble the dispatch table.
    ///
    /// I/O errors abort immediately. Malformed markers and duplicate names are
    /// collected across all files and reported together as [`GenError::Rejected`].
    fn build_table(&self) -> Result<(Vec<ScanResult>, DispatchTable)> {
        let files = scan_dir(&self.config.jobs_dir)?;

        let mut results = Vec::with_capacity(files.len());
        let mut table = DispatchTable::new();
        let mut rejected = Vec::new();

        for path in files {
            if !self.parser.participates(&path) {
                results.push(ScanResult {
                    path,
                    status: ScanStatus::Skipped {
                        reason: format!("name does not contain `{}`", self.config.file_marker),
                    },
                });
                continue;
            }

            let candidate = CandidateFile::read(&path)?;
            let pushed = self
                .parser
                .extract(&candidate)
                .and_then(|def| {
                    let job_name = def.job_name.clone();
                    table.push(def).map(|()| job_name)
                });

            match pushed {
                Ok(job_name) => results.push(ScanResult {
                    path,
                    status: ScanStatus::Found { job_name },
                }),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "rejected job file");
                    rejected.push(e);
                }
            }
        }

        if !rejected.is_empty() {
            return Err(GenError::Rejected(rejected));
        }
        Ok((results, table))
    }
}
