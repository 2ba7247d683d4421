use crate::job::{Job, Task};

// goflow: build_ingest ingest
pub fn build_ingest() -> Job {
    Job::new("ingest")
        .add_task(Task::new("fetch", "curl -sSfO https://example.com/export.csv"))
        .add_task(Task::new("load", "psql -f load.sql"))
}
