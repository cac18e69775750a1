//! Error types for the fleet monitor.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Broad failure category a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Refused, unreachable, timed out, or the client exited non-zero.
    Connection,
    /// The reply was not JSON or did not match the expected schema.
    Parse,
    /// The RPC tool could not be fetched or installed.
    Bootstrap,
    /// Invalid arguments or configuration values.
    Configuration,
}

/// Errors from a single RPC call against one node.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to start {binary}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{address} unreachable: {message}")]
    Connection { address: String, message: String },

    #[error("{address} did not answer within {timeout:?}")]
    Timeout { address: String, timeout: Duration },

    #[error("malformed reply from {address}: {message}")]
    Parse { address: String, message: String },
}

impl RpcError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Spawn { .. } | Self::Connection { .. } | Self::Timeout { .. } => {
                FailureKind::Connection
            }
            Self::Parse { .. } => FailureKind::Parse,
        }
    }
}

/// Errors while fetching and installing the RPC client tool.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("no grpcurl release for {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("download of {url} failed")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download of {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("extracting {archive} failed: {message}")]
    Extract { archive: PathBuf, message: String },

    #[error("{0} not found after extraction")]
    MissingBinary(PathBuf),

    #[error("{binary} is not runnable: {message}")]
    Probe { binary: PathBuf, message: String },

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Invalid configuration or command-line values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{0}' (expected host:port or name=host:port)")]
    InvalidEndpoint(String),

    #[error("duplicate endpoint '{0}'")]
    DuplicateEndpoint(String),

    #[error("endpoint list is empty")]
    NoEndpoints,

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },

    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Errors that abort a poll cycle.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("version query against {endpoint} failed")]
    VersionQuery {
        endpoint: String,
        #[source]
        source: RpcError,
    },
}

/// Top-level failures. Every variant ends the run with exit code 1.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error")]
    Configuration(#[from] ConfigError),

    #[error("bootstrap failed")]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error("grpcurl is not installed (try \"apt install grpcurl\" or allow bootstrap)")]
    ToolUnavailable,
}

impl MonitorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration(_) => FailureKind::Configuration,
            Self::Bootstrap(_) | Self::ToolUnavailable => FailureKind::Bootstrap,
            Self::Poll(PollError::VersionQuery { source, .. }) => source.kind(),
        }
    }
}
