//! Ordered dispatch table with duplicate job name detection.

use std::collections::HashMap;

use crate::error::{GenError, Result};
use crate::marker::JobDefinition;

/// Job definitions in discovery order, keyed uniquely by job name.
#[derive(Debug, Default, Clone)]
pub struct DispatchTable {
    entries: Vec<JobDefinition>,
    index: HashMap<String, usize>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition, rejecting a job name that is already taken.
    ///
    /// On rejection the table is left unchanged.
    pub fn push(&mut self, def: JobDefinition) -> Result<()> {
        if let Some(&existing) = self.index.get(&def.job_name) {
            return Err(GenError::DuplicateJob {
                name: def.job_name,
                first: self.entries[existing].path.clone(),
                second: def.path,
            });
        }
        self.index.insert(def.job_name.clone(), self.entries.len());
        self.entries.push(def);
        Ok(())
    }

    pub fn entries(&self) -> &[JobDefinition] {
        &self.entries
    }

    pub fn get(&self, job_name: &str) -> Option<&JobDefinition> {
        self.index.get(job_name).map(|&i| &self.entries[i])
    }

    /// Job names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|d| d.job_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn def(job: &str, constructor: &str, file: &str) -> JobDefinition {
        JobDefinition {
            job_name: job.to_string(),
            constructor_name: constructor.to_string(),
            module: file.trim_end_matches(".rs").to_string(),
            path: PathBuf::from("jobs").join(file),
        }
    }

    #[test]
    fn keeps_discovery_order() {
        let mut table = DispatchTable::new();
        table.push(def("report", "Report", "b_job.rs")).unwrap();
        table.push(def("ingest", "Ingest", "a_job.rs")).unwrap();
        table.push(def("cleanup", "Cleanup", "c_job.rs")).unwrap();

        assert_eq!(table.names(), vec!["report", "ingest", "cleanup"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn duplicate_job_name_is_rejected() {
        let mut table = DispatchTable::new();
        table.push(def("ingest", "IngestA", "a_job.rs")).unwrap();

        match table.push(def("ingest", "IngestB", "b_job.rs")) {
            Err(GenError::DuplicateJob { name, first, second }) => {
                assert_eq!(name, "ingest");
                assert_eq!(first, PathBuf::from("jobs/a_job.rs"));
                assert_eq!(second, PathBuf::from("jobs/b_job.rs"));
            }
            other => panic!("expected DuplicateJob, got: {:?}", other),
        }

        // Table unchanged
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ingest").unwrap().constructor_name, "IngestA");
    }

    #[test]
    fn same_constructor_different_names_is_allowed() {
        let mut table = DispatchTable::new();
        table.push(def("ingest", "Build", "a_job.rs")).unwrap();
        table.push(def("ingest-v2", "Build", "b_job.rs")).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_table() {
        let table = DispatchTable::new();
        assert!(table.is_empty());
        assert!(table.get("anything").is_none());
        assert!(table.names().is_empty());
    }
}
