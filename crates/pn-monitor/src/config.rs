//! Monitor configuration.
//!
//! Defaults describe the public fleet; environment variables and then
//! command-line flags override them.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::NodeEndpoint;
use crate::error::ConfigError;

/// The compiled-in public fleet, in report order.
pub const DEFAULT_FLEET: [&str; 8] = [
    "pub-node1.smesh.cloud:9092",
    "pub-node2.smesh.cloud:9092",
    "pub-node3.smesh.cloud:9092",
    "pub-node4.smesh.cloud:9092",
    "pub-node5.smesh.cloud:9092",
    "pub-node6.smesh.cloud:9092",
    "pub-node7.smesh.cloud:9092",
    "pub-node8.smesh.cloud:9092",
];

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of nodes queried at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Width used when the terminal size cannot be detected.
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// What a failed version query does to the poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionPolicy {
    /// Leave the version blank and keep the node's status.
    #[default]
    Degrade,
    /// Abort the whole cycle.
    Abort,
}

/// Knobs of the node poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Maximum in-flight queries. 1 polls strictly in sequence.
    pub concurrency: usize,
    pub version_policy: VersionPolicy,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            version_policy: VersionPolicy::Degrade,
        }
    }
}

/// Full configuration of one monitor run.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub endpoints: Vec<NodeEndpoint>,
    pub include_version: bool,
    pub poller: PollerConfig,
    pub timeout: Duration,
    /// Fixed terminal width; detected when `None`.
    pub terminal_width: Option<usize>,
    /// Explicit grpcurl binary, bypassing discovery.
    pub grpcurl: Option<PathBuf>,
    /// Where a bootstrapped grpcurl is installed.
    pub install_dir: PathBuf,
    /// Fetch grpcurl when it cannot be found.
    pub bootstrap: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            endpoints: default_fleet(),
            include_version: false,
            poller: PollerConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            terminal_width: None,
            grpcurl: None,
            install_dir: default_install_dir(),
            bootstrap: true,
        }
    }
}

impl MonitorConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PN_NODES`: comma-separated endpoints (default: public fleet)
    /// - `PN_TIMEOUT_SECS`: per-call timeout in seconds (default: 10)
    /// - `PN_CONCURRENCY`: in-flight queries (default: 4)
    /// - `PN_GRPCURL`: path to the grpcurl binary
    /// - `PN_INSTALL_DIR`: bootstrap install directory
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(nodes) = env::var("PN_NODES") {
            config.endpoints = parse_endpoint_list(&nodes)?;
        }
        if let Ok(secs) = env::var("PN_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("PN_TIMEOUT_SECS", &secs)?);
        }
        if let Ok(n) = env::var("PN_CONCURRENCY") {
            config.poller.concurrency = parse_number("PN_CONCURRENCY", &n)? as usize;
        }
        if let Ok(path) = env::var("PN_GRPCURL") {
            config.grpcurl = Some(PathBuf::from(path));
        }
        if let Ok(dir) = env::var("PN_INSTALL_DIR") {
            config.install_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Check the values a run depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            if !seen.insert(endpoint.address()) {
                return Err(ConfigError::DuplicateEndpoint(endpoint.address()));
            }
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Zero { name: "timeout" });
        }
        if self.poller.concurrency == 0 {
            return Err(ConfigError::Zero { name: "concurrency" });
        }
        if self.terminal_width == Some(0) {
            return Err(ConfigError::Zero { name: "width" });
        }

        Ok(())
    }
}

/// Parse the compiled-in fleet.
pub fn default_fleet() -> Vec<NodeEndpoint> {
    DEFAULT_FLEET
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Parse a comma-separated endpoint list, skipping empty entries.
pub fn parse_endpoint_list(list: &str) -> Result<Vec<NodeEndpoint>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

fn parse_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// `<cache dir>/public-nodes/bin`, or the temp dir when there is no cache dir.
pub fn default_install_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("public-nodes")
        .join("bin")
}
