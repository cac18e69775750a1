//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use pn_monitor::{ConfigError, MonitorConfig, NodeEndpoint, VersionPolicy};

/// Health check for the public Spacemesh node fleet
#[derive(Parser, Debug)]
#[command(name = "public-nodes")]
#[command(version, disable_version_flag = true)]
#[command(about = "Query every public node once and print a sync health report")]
pub struct Args {
    /// Show each node's software version
    #[arg(short = 's', long)]
    pub show_version: bool,

    /// Abort the whole check when a version query fails
    #[arg(long)]
    pub strict_version: bool,

    /// Node to query, as HOST:PORT or NAME=HOST:PORT (repeatable, replaces the default fleet)
    #[arg(short = 'n', long = "node", value_name = "HOST:PORT")]
    pub nodes: Vec<String>,

    /// Per-query timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Nodes queried at once (1 = one after another)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Terminal width override
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Path to the grpcurl binary
    #[arg(long, value_name = "PATH")]
    pub grpcurl: Option<PathBuf>,

    /// Where to install grpcurl if it has to be downloaded
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Never download grpcurl
    #[arg(long)]
    pub no_bootstrap: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Args {
    /// Layer the flags over `config`. Flags always win.
    pub fn apply(&self, mut config: MonitorConfig) -> Result<MonitorConfig, ConfigError> {
        if !self.nodes.is_empty() {
            config.endpoints = self
                .nodes
                .iter()
                .map(|node| node.parse::<NodeEndpoint>())
                .collect::<Result<_, _>>()?;
        }

        if self.show_version {
            config.include_version = true;
        }
        if self.strict_version {
            config.poller.version_policy = VersionPolicy::Abort;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.concurrency {
            config.poller.concurrency = n;
        }
        if let Some(width) = self.width {
            config.terminal_width = Some(width);
        }
        if let Some(path) = &self.grpcurl {
            config.grpcurl = Some(path.clone());
        }
        if let Some(dir) = &self.install_dir {
            config.install_dir = dir.clone();
        }
        if self.no_bootstrap {
            config.bootstrap = false;
        }

        Ok(config)
    }
}
