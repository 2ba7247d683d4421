use std::path::{Path, PathBuf};

/// Directory scanned for job files when nothing else is configured.
pub const DEFAULT_JOBS_DIR: &str = "./jobs";
/// Generated file written when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "./flow.rs";
/// Substring a file name must contain to be treated as a job file.
pub const DEFAULT_FILE_MARKER: &str = "_job";
/// Keyword of the `// goflow: Constructor name` marker comment.
pub const DEFAULT_DIRECTIVE: &str = "goflow";
/// Path of the job type returned by every constructor.
pub const DEFAULT_JOB_TYPE: &str = "crate::job::Job";
/// Path of the module holding one submodule per job file.
pub const DEFAULT_JOBS_MODULE: &str = "crate::jobs";

// ── Generator config ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory scanned (non-recursively) for job files.
    pub jobs_dir: PathBuf,
    /// File the generated dispatch source is written to.
    pub output: PathBuf,
    /// File name substring that marks a job file.
    pub file_marker: String,
    /// Marker comment keyword.
    pub directive: String,
    pub job_type: String,
    pub jobs_module: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            jobs_dir: PathBuf::from(DEFAULT_JOBS_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            file_marker: DEFAULT_FILE_MARKER.to_string(),
            directive: DEFAULT_DIRECTIVE.to_string(),
            job_type: DEFAULT_JOB_TYPE.to_string(),
            jobs_module: DEFAULT_JOBS_MODULE.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_jobs_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.jobs_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    pub fn with_file_marker(mut self, marker: impl Into<String>) -> Self {
        self.file_marker = marker.into();
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    pub fn with_job_type(mut self, path: impl Into<String>) -> Self {
        self.job_type = path.into();
        self
    }

    pub fn with_jobs_module(mut self, path: impl Into<String>) -> Self {
        self.jobs_module = path.into();
        self
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Generator config:");
        tracing::info!("  jobs_dir:    {}", self.jobs_dir.display());
        tracing::info!("  output:      {}", self.output.display());
        tracing::info!("  file_marker: {}", self.file_marker);
        tracing::info!("  directive:   {}", self.directive);
        tracing::info!("  job_type:    {}", self.job_type);
        tracing::info!("  jobs_module: {}", self.jobs_module);
    }
}

/// Last `::` segment of a Rust path (`crate::job::Job` -> `Job`).
pub(crate) fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
