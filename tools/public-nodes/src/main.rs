//! public-nodes: health check for the public Spacemesh node fleet.
//!
//! Queries every node once, prints a width-bounded report to stdout and
//! exits. Logs go to stderr.

mod cli;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use pn_monitor::{
    resolve_grpcurl, GrpcurlBootstrap, GrpcurlClient, HealthCheck, MonitorConfig, MonitorError,
    NodePoller, SearchPathLocator,
};
use pn_telemetry::{init_logging, TelemetryConfig};

use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&TelemetryConfig::from_env()) {
        eprintln!("Warning: {}", e);
    }

    match run(&args).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<Vec<String>> {
    let config = MonitorConfig::from_env().context("reading environment")?;
    let config = args.apply(config).map_err(MonitorError::from)?;
    config.validate().map_err(MonitorError::from)?;

    let binary = locate_grpcurl(&config).await?;
    let client = GrpcurlClient::with_timeout(binary, config.timeout);
    match client.probe().await {
        Ok(banner) => debug!(binary = %client.binary().display(), version = %banner, "grpcurl ready"),
        Err(e) => {
            debug!(error = %e, "grpcurl probe failed");
            return Err(MonitorError::ToolUnavailable.into());
        }
    }

    let width = terminal::detect_width(config.terminal_width);
    info!(
        nodes = config.endpoints.len(),
        width,
        include_version = config.include_version,
        "Running health check"
    );

    let poller = NodePoller::with_config(Arc::new(client), config.poller.clone());
    let check = HealthCheck::new(poller, config.endpoints, config.include_version, width);
    let report = check.run().await?;

    Ok(report.lines)
}

async fn locate_grpcurl(config: &MonitorConfig) -> Result<std::path::PathBuf, MonitorError> {
    let locator = SearchPathLocator::new().with_dir(&config.install_dir);
    let bootstrap = config
        .bootstrap
        .then(|| GrpcurlBootstrap::new(&config.install_dir))
        .transpose()?;

    resolve_grpcurl(config.grpcurl.as_deref(), &locator, bootstrap.as_ref()).await
}
