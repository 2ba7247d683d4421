//! Build-time generator of job dispatch source.
//!
//! This crate provides:
//! - Non-recursive scanning of a job definitions directory
//! - Extraction of `// goflow: Constructor name` marker comments
//! - A dispatch table that rejects duplicate job names
//! - Minijinja rendering of a `select_job` function and `JOBS` table
//! - Atomic write of the generated file
//!
//! Typical use from a `build.rs`:
//!
//! ```no_run
//! use goflow_codegen::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::default()
//!     .with_jobs_dir("src/jobs")
//!     .with_output("target/flow.rs");
//! Generator::new(config)?.run()?;
//! # Ok::<(), goflow_codegen::GenError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod marker;
pub mod render;
pub mod scanner;
pub mod table;
pub mod writer;

pub use config::GeneratorConfig;
pub use error::{GenError, Result, ScanResult, ScanStatus};
pub use generator::{GenerateReport, Generator, RenderedFlow};
pub use marker::{CandidateFile, JobDefinition, MarkerParser};
pub use render::FlowRenderer;
pub use table::DispatchTable;
pub use writer::WriteOutcome;
