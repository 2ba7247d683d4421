//! Marker comment extraction.
//!
//! A participating job file declares itself with a single line comment:
//!
//! ```text
//! // goflow: IngestJob ingest
//! ```
//!
//! The line must split into exactly four whitespace-separated tokens: the
//! comment token, the directive keyword, the constructor function name and
//! the job name.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{GenError, Result};

/// Number of tokens in a well-formed marker line.
const MARKER_TOKENS: usize = 4;

/// A job file and its raw contents, alive for one generation run.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub content: String,
}

impl CandidateFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }
}

/// One `(job name, constructor)` pair extracted from a job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDefinition {
    /// External key used to select the job at runtime.
    pub job_name: String,
    /// Zero-argument function that builds the job.
    pub constructor_name: String,
    /// Module the constructor lives in (the file stem).
    pub module: String,
    /// File the definition was read from.
    #[serde(skip)]
    pub path: PathBuf,
}

/// Decides which files participate and parses their marker comment.
#[derive(Debug, Clone)]
pub struct MarkerParser {
    file_marker: String,
    keyword_token: String,
    pattern: Regex,
}

impl MarkerParser {
    /// Compile the marker grammar for the given file-name marker and directive keyword.
    pub fn new(file_marker: &str, directive: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?m)^[ \t]*//[ \t]*{}:.*$",
            regex::escape(directive)
        ))
        .map_err(|e| GenError::Config(format!("invalid directive `{directive}`: {e}")))?;

        Ok(Self {
            file_marker: file_marker.to_string(),
            keyword_token: format!("{directive}:"),
            pattern,
        })
    }

    /// Whether the file name carries the job file marker (e.g. `ingest_job.rs`).
    pub fn participates(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.contains(&self.file_marker))
            .unwrap_or(false)
    }

    /// Extract the job definition from a candidate file.
    ///
    /// Only the first marker line is used. A missing marker, a wrong token
    /// count or an invalid identifier is a malformed-marker error naming the file.
    pub fn extract(&self, file: &CandidateFile) -> Result<JobDefinition> {
        let mut matches = self.pattern.find_iter(&file.content);
        let line = matches
            .next()
            .ok_or_else(|| GenError::malformed(&file.path, "no marker comment found"))?
            .as_str();

        if matches.next().is_some() {
            debug!(path = %file.path.display(), "multiple marker comments, using the first");
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != MARKER_TOKENS {
            return Err(GenError::malformed(
                &file.path,
                format!(
                    "expected `// <directive>: <Constructor> <job>` ({MARKER_TOKENS} tokens), found {} in {:?}",
                    tokens.len(),
                    line.trim()
                ),
            ));
        }

        if tokens[0] != "//" || tokens[1] != self.keyword_token {
            return Err(GenError::malformed(
                &file.path,
                format!(
                    "expected `// {}` before the constructor, found `{} {}`",
                    self.keyword_token, tokens[0], tokens[1]
                ),
            ));
        }

        let constructor_name = tokens[2];
        let job_name = tokens[3];

        if !is_item_name(constructor_name) {
            return Err(GenError::malformed(
                &file.path,
                format!("constructor `{constructor_name}` is not a valid identifier"),
            ));
        }
        if !is_job_name(job_name) {
            return Err(GenError::malformed(
                &file.path,
                format!("job name `{job_name}` may only contain ASCII letters, digits, '_', '-' and '.'"),
            ));
        }

        let module = file
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| is_item_name(s))
            .ok_or_else(|| {
                GenError::malformed(&file.path, "file stem is not a valid module name")
            })?;

        info!(
            job = %job_name,
            constructor = %constructor_name,
            path = %file.path.display(),
            "found job"
        );

        Ok(JobDefinition {
            job_name: job_name.to_string(),
            constructor_name: constructor_name.to_string(),
            module: module.to_string(),
            path: file.path.clone(),
        })
    }
}

/// Rust identifier check (ASCII only, no raw identifiers).
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strict and reserved keywords (2021 edition).
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Identifier usable as a function or module name in a path (not a keyword).
fn is_item_name(s: &str) -> bool {
    is_identifier(s) && !KEYWORDS.contains(&s)
}

fn is_job_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
