mod flow;
mod job;
mod jobs;

use anyhow::bail;
use clap::Parser;
use tracing::info;

/// Resolve a job by name and print its tasks.
#[derive(Parser, Debug)]
#[command(name = "goflow-example", version, about)]
struct Cli {
    /// Job to build. Lists the registered jobs when omitted.
    job: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let Some(name) = cli.job else {
        for (name, _) in flow::JOBS {
            println!("{name}");
        }
        return Ok(());
    };

    let Some(build) = flow::select_job(&name) else {
        bail!("no such job: {name}");
    };

    let job = build();
    info!(job = %job.name, tasks = job.tasks.len(), "built job");
    for task in &job.tasks {
        println!("{}\t{}", task.name, task.command);
    }
    Ok(())
}
