//! grpcurl-backed RPC client.
//!
//! Each call runs `grpcurl -plaintext` against one node. The child process
//! is killed if the call times out or its future is dropped.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::DEFAULT_TIMEOUT;
use crate::domain::{NodeEndpoint, RawStatus};
use crate::error::RpcError;
use crate::ports::NodeRpc;

use super::payload::{decode_status, decode_version};

/// Fully qualified `Status` method of the node service.
pub const STATUS_METHOD: &str = "spacemesh.v1.NodeService.Status";

/// Fully qualified `Version` method of the node service.
pub const VERSION_METHOD: &str = "spacemesh.v1.NodeService.Version";

/// [`NodeRpc`] implementation that shells out to grpcurl.
#[derive(Debug, Clone)]
pub struct GrpcurlClient {
    binary: PathBuf,
    timeout: Duration,
}

impl GrpcurlClient {
    /// Create a client with the default per-call timeout.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self::with_timeout(binary, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `grpcurl -version` and return what it printed.
    pub async fn probe(&self) -> Result<String, RpcError> {
        let output = self.run(Command::new(&self.binary).arg("-version"), "grpcurl -version").await?;
        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(String::from_utf8_lossy(&text).trim().to_string())
    }

    async fn invoke(&self, endpoint: &NodeEndpoint, method: &str) -> Result<Vec<u8>, RpcError> {
        let address = endpoint.address();
        debug!(address = %address, method, "grpcurl call");

        let mut command = Command::new(&self.binary);
        command
            .arg("-plaintext")
            .arg("-max-time")
            .arg(self.timeout.as_secs_f64().to_string())
            .arg("-d")
            .arg("")
            .arg(&address)
            .arg(method);

        let output = self.run(&mut command, &address).await?;
        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(RpcError::Parse {
                address,
                message: "empty reply".to_string(),
            });
        }
        Ok(output.stdout)
    }

    /// Spawn, wait with a timeout, and turn a non-zero exit into an error.
    async fn run(&self, command: &mut Command, address: &str) -> Result<Output, RpcError> {
        command.stdin(Stdio::null()).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                return Err(RpcError::Timeout {
                    address: address.to_string(),
                    timeout: self.timeout,
                })
            }
            Ok(Err(source)) => {
                return Err(RpcError::Spawn {
                    binary: self.binary.clone(),
                    source,
                })
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(RpcError::Connection {
                address: address.to_string(),
                message,
            });
        }

        Ok(Output {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

struct Output {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

#[async_trait]
impl NodeRpc for GrpcurlClient {
    async fn query_status(&self, endpoint: &NodeEndpoint) -> Result<RawStatus, RpcError> {
        let reply = self.invoke(endpoint, STATUS_METHOD).await?;
        decode_status(&reply).map_err(|message| RpcError::Parse {
            address: endpoint.address(),
            message,
        })
    }

    async fn query_version(&self, endpoint: &NodeEndpoint) -> Result<String, RpcError> {
        let reply = self.invoke(endpoint, VERSION_METHOD).await?;
        decode_version(&reply).map_err(|message| RpcError::Parse {
            address: endpoint.address(),
            message,
        })
    }
}
