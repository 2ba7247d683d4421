use crate::job::{Job, Task};

// goflow: build_report report
pub fn build_report() -> Job {
    Job::new("report").add_task(Task::new("sleep 1", "sleep 1"))
}
