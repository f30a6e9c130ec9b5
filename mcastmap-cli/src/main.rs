//! mcastmap binary
//!
//! Crawls the network from a seed router, annotates the multicast
//! distribution tree for one (source, group) entry, and writes the JSON map
//! artifact for the visualizer.

mod args;
mod output;
mod ssh;

use args::Cli;
use mcastmap_core::RunFlag;
use mcastmap_engine::{MapperConfig, Pipeline};
use ssh::SshSession;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

async fn run(cli: Cli) -> mcastmap_core::Result<()> {
    let session = Arc::new(
        SshSession::new(cli.username, cli.password)
            .with_port(cli.port)
            .with_connect_timeout(Duration::from_secs(cli.connect_timeout)),
    );

    let config = MapperConfig::new(cli.source_ip, cli.group_ip)
        .with_sample_interval(Duration::from_secs(cli.interval))
        .with_concurrency(cli.concurrency);

    let run_flag = RunFlag::new();
    let signal_flag = run_flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling run");
            signal_flag.cancel();
        }
    });

    let pipeline = Pipeline::new(session, config);
    let report = pipeline.run(&cli.initial_router, &run_flag).await?;

    for failure in &report.failures {
        warn!("{failure}");
    }

    let path = output::write_artifact(&report.graph, &cli.output_dir)?;
    info!(
        devices = report.graph.len(),
        failed = report.failures.len(),
        path = %path.display(),
        "multicast map written"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        error!("{err}");
        std::process::exit(1);
    }
}
