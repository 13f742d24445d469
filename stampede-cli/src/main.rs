use anyhow::Context;
use clap::Parser;
use stampede::config::parse_label;
use stampede::{BenchConfig, DockerRuntime, Session};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Container runtime benchmarking tool.
#[derive(Debug, Parser)]
#[command(name = "stampede", version, about)]
struct Args {
    /// Number of requests to perform at a time.
    #[arg(short, long, default_value_t = 1)]
    concurrency: u32,

    /// Number of containers to start for the benchmarking session.
    #[arg(short = 'n', long, default_value_t = 1)]
    requests: u32,

    /// Image(s) to use for benchmarking, round-robined across workers.
    #[arg(short, long = "image", required = true)]
    image: Vec<String>,

    /// Label(s) to apply to containers, as key=value.
    #[arg(short, long = "label")]
    label: Vec<String>,

    /// Command to run inside each container.
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<BenchConfig> {
        let mut config = BenchConfig::new(self.requests, self.concurrency, self.image);

        if !self.label.is_empty() {
            let labels = self
                .label
                .iter()
                .map(|raw| parse_label(raw))
                .collect::<Result<HashMap<_, _>, _>>()?;
            config = config.with_labels(labels);
        }
        if !self.command.is_empty() {
            config = config.with_command(self.command);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Args::parse().into_config()?;
    let client = DockerRuntime::connect().context("connecting to container runtime")?;

    let report = Session::new(config, Arc::new(client)).run().await?;
    println!("\n{report}");

    Ok(())
}
