//! Minijinja rendering of the generated dispatch source.
//!
//! The template is fixed and registered once when the renderer is built, so
//! a broken template surfaces at construction rather than mid-run.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::config::{last_segment, GeneratorConfig};
use crate::error::{GenError, Result};
use crate::marker::{is_identifier, JobDefinition};
use crate::table::DispatchTable;

/// Name shown in the "do not edit" header.
pub const GENERATOR_NAME: &str = "goflow-gen";

const TEMPLATE_NAME: &str = "flow.rs";

const FLOW_TEMPLATE: &str = r#"// Code generated by {{ generator }}; DO NOT EDIT.
// Source: {{ jobs_dir }}

use {{ job_type }};
#[allow(unused_imports)]
use {{ jobs_module }};

/// Every job discovered by the generator, in discovery order.
pub static JOBS: &[(&str, fn() -> {{ job_type_name }})] = &[
{% for job in jobs %}
    ("{{ job.job_name }}", {{ jobs_alias }}::{{ job.module }}::{{ job.constructor_name }}),
{% endfor %}
];

/// Resolve a job name to the constructor that builds it.
#[allow(clippy::match_single_binding)]
pub fn select_job(name: &str) -> Option<fn() -> {{ job_type_name }}> {
    match name {
{% for job in jobs %}
        "{{ job.job_name }}" => Some({{ jobs_alias }}::{{ job.module }}::{{ job.constructor_name }}),
{% endfor %}
        _ => None,
    }
}
"#;

/// Context data available to the flow template.
#[derive(Debug, Serialize)]
struct FlowContext<'a> {
    generator: &'a str,
    jobs_dir: String,
    job_type: &'a str,
    job_type_name: &'a str,
    jobs_module: &'a str,
    jobs_alias: &'a str,
    jobs: &'a [JobDefinition],
}

/// Renders a [`DispatchTable`] into Rust source.
pub struct FlowRenderer {
    env: Environment<'static>,
    jobs_dir: String,
    job_type: String,
    jobs_module: String,
}

impl FlowRenderer {
    /// Build the template environment for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Config`] if the job type or jobs module is not a
    /// Rust path, and [`GenError::Template`] if the template fails to parse.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        check_rust_path("job_type", &config.job_type)?;
        check_rust_path("jobs_module", &config.jobs_module)?;

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(TEMPLATE_NAME, FLOW_TEMPLATE)?;

        Ok(Self {
            env,
            jobs_dir: config.jobs_dir.display().to_string(),
            job_type: config.job_type.clone(),
            jobs_module: config.jobs_module.clone(),
        })
    }

    /// Render the table. Identical tables render to identical text.
    pub fn render(&self, table: &DispatchTable) -> Result<String> {
        let ctx = FlowContext {
            generator: GENERATOR_NAME,
            jobs_dir: self.jobs_dir.clone(),
            job_type: &self.job_type,
            job_type_name: last_segment(&self.job_type),
            jobs_module: &self.jobs_module,
            jobs_alias: last_segment(&self.jobs_module),
            jobs: table.entries(),
        };

        let source = self.env.get_template(TEMPLATE_NAME)?.render(&ctx)?;
        Ok(source)
    }
}

fn check_rust_path(field: &str, path: &str) -> Result<()> {
    if path.split("::").all(is_identifier) {
        Ok(())
    } else {
        Err(GenError::Config(format!("{field} `{path}` is not a Rust path")))
    }
}
