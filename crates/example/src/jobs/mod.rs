//! Job definitions. Each `*_job.rs` file declares one constructor with a
//! `// goflow:` marker; `build.rs` turns those into `crate::flow::select_job`.

pub mod ingest_job;
pub mod report_job;
