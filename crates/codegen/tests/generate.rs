//! Integration tests for the full generation pass: scan, extract, build,
//! render and write against real temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use goflow_codegen::{GenError, Generator, GeneratorConfig, ScanStatus, WriteOutcome};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a project dir with an empty `jobs/` directory and a config pointing at it.
fn project() -> (TempDir, GeneratorConfig) {
    let dir = TempDir::new().expect("create tempdir");
    fs::create_dir(dir.path().join("jobs")).unwrap();
    let config = GeneratorConfig::default()
        .with_jobs_dir(dir.path().join("jobs"))
        .with_output(dir.path().join("flow.rs"));
    (dir, config)
}

fn write_job(dir: &Path, file: &str, constructor: &str, job: &str) {
    let body = format!(
        "use crate::job::Job;\n\n// goflow: {constructor} {job}\npub fn {constructor}() -> Job {{\n    Job::new(\"{job}\")\n}}\n"
    );
    fs::write(dir.join("jobs").join(file), body).unwrap();
}

fn generate(config: &GeneratorConfig) -> Result<String, GenError> {
    Generator::new(config.clone())?.run()?;
    Ok(fs::read_to_string(&config.output).unwrap())
}

/// Extract the match arm job names in the order they appear.
fn arm_names(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with('"') && l.contains("=> Some("))
        .map(|l| l.split('"').nth(1).unwrap().to_string())
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn ingest_job_resolves_to_its_constructor() {
    let (dir, config) = project();
    write_job(dir.path(), "ingest_job.rs", "IngestJob", "ingest");

    let source = generate(&config).unwrap();

    assert!(source.starts_with("// Code generated by goflow-gen; DO NOT EDIT.\n"));
    assert!(source.contains("use crate::job::Job;\n"));
    assert!(source.contains("use crate::jobs;\n"));
    assert!(source.contains(r#"        "ingest" => Some(jobs::ingest_job::IngestJob),"#));
    assert!(source.contains("        _ => None,"));
    assert_eq!(arm_names(&source), vec!["ingest"]);
}

#[test]
fn no_participating_files_yields_sentinel_only() {
    let (dir, config) = project();
    fs::write(dir.path().join("jobs/mod.rs"), "// goflow: Ignored ignored\n").unwrap();
    fs::write(dir.path().join("jobs/helpers.rs"), "pub fn help() {}\n").unwrap();

    let source = generate(&config).unwrap();

    assert!(arm_names(&source).is_empty());
    assert!(source.contains("    match name {\n        _ => None,\n    }"));
    assert!(source.contains("= &[\n];"));
}

#[test]
fn arm_order_follows_file_name_order() {
    let (dir, config) = project();
    write_job(dir.path(), "c_report_job.rs", "Report", "report");
    write_job(dir.path(), "a_ingest_job.rs", "Ingest", "ingest");
    write_job(dir.path(), "b_clean_job.rs", "Clean", "clean");

    let source = generate(&config).unwrap();
    assert_eq!(arm_names(&source), vec!["ingest", "clean", "report"]);
}

#[test]
fn second_run_is_byte_identical_and_untouched() {
    let (dir, config) = project();
    write_job(dir.path(), "ingest_job.rs", "IngestJob", "ingest");
    write_job(dir.path(), "report_job.rs", "ReportJob", "report");

    let generator = Generator::new(config.clone()).unwrap();
    let first = generator.run().unwrap();
    let first_source = fs::read_to_string(&config.output).unwrap();

    let second = generator.run().unwrap();
    let second_source = fs::read_to_string(&config.output).unwrap();

    assert_eq!(first.outcome, WriteOutcome::Written);
    assert_eq!(second.outcome, WriteOutcome::Unchanged);
    assert_eq!(first_source, second_source);
}

#[test]
fn duplicate_job_names_are_rejected() {
    let (dir, config) = project();
    write_job(dir.path(), "a_job.rs", "IngestA", "ingest");
    write_job(dir.path(), "b_job.rs", "IngestB", "ingest");

    let err = generate(&config).unwrap_err();
    let GenError::Rejected(errors) = err else {
        panic!("expected Rejected, got: {err:?}");
    };
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        GenError::DuplicateJob { name, first, second } => {
            assert_eq!(name, "ingest");
            assert!(first.ends_with("a_job.rs"));
            assert!(second.ends_with("b_job.rs"));
        }
        other => panic!("expected DuplicateJob, got: {other:?}"),
    }
    assert!(!config.output.exists(), "nothing is written on failure");
}

#[test]
fn malformed_marker_names_the_file() {
    let (dir, config) = project();
    write_job(dir.path(), "good_job.rs", "Good", "good");
    fs::write(dir.path().join("jobs/broken_job.rs"), "// goflow: OnlyConstructor\n").unwrap();

    let err = generate(&config).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("broken_job.rs"), "{msg}");
    assert!(msg.contains("malformed marker comment"), "{msg}");
}

#[test]
fn failed_run_keeps_previous_output() {
    let (dir, config) = project();
    write_job(dir.path(), "ingest_job.rs", "IngestJob", "ingest");
    let before = generate(&config).unwrap();

    write_job(dir.path(), "other_job.rs", "Other", "ingest");
    assert!(generate(&config).is_err());

    assert_eq!(fs::read_to_string(&config.output).unwrap(), before);
    assert!(!dir.path().join(".flow.rs.tmp").exists());
}

#[test]
fn missing_jobs_directory_is_fatal() {
    let dir = TempDir::new().expect("create tempdir");
    let config = GeneratorConfig::default()
        .with_jobs_dir(dir.path().join("jobs"))
        .with_output(dir.path().join("flow.rs"));

    match generate(&config) {
        Err(GenError::Io { path, .. }) => assert_eq!(path, dir.path().join("jobs")),
        other => panic!("expected Io error, got: {other:?}"),
    }
}

#[test]
fn report_lists_every_entry() {
    let (dir, config) = project();
    write_job(dir.path(), "ingest_job.rs", "IngestJob", "ingest");
    fs::write(dir.path().join("jobs/mod.rs"), "pub mod ingest_job;\n").unwrap();

    let report = Generator::new(config).unwrap().run().unwrap();

    let statuses: Vec<(PathBuf, &ScanStatus)> = report
        .results
        .iter()
        .map(|r| (PathBuf::from(r.path.file_name().unwrap()), &r.status))
        .collect();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].0, PathBuf::from("ingest_job.rs"));
    assert_eq!(statuses[0].1, &ScanStatus::Found { job_name: "ingest".to_string() });
    assert_eq!(statuses[1].0, PathBuf::from("mod.rs"));
    assert!(matches!(statuses[1].1, ScanStatus::Skipped { .. }));
}

#[test]
fn jobs_path_that_is_a_file_keeps_previous_output() {
    let (dir, config) = project();
    write_job(dir.path(), "ingest_job.rs", "IngestJob", "ingest");
    let before = generate(&config).unwrap();

    let not_a_dir = dir.path().join("jobs.rs");
    fs::write(&not_a_dir, "not a dir").unwrap();
    let config = config.with_jobs_dir(&not_a_dir);

    match generate(&config) {
        Err(GenError::Io { path, .. }) => assert_eq!(path, not_a_dir),
        other => panic!("expected Io error, got: {other:?}"),
    }
    assert_eq!(fs::read_to_string(&config.output).unwrap(), before);
}
