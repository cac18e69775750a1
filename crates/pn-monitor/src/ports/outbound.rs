//! Outbound Ports (Driven Ports)
//!
//! Capabilities the monitor needs from its host: an RPC client able to
//! reach a node, and a way to find executables without touching the
//! process environment.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{NodeEndpoint, RawStatus};
use crate::error::RpcError;

/// Status/version RPC client for a single node.
///
/// Implementations must be `Send + Sync`: the poller drives several calls
/// concurrently from one instance.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Call the node's `Status` method.
    async fn query_status(&self, endpoint: &NodeEndpoint) -> Result<RawStatus, RpcError>;

    /// Call the node's `Version` method and return the version string.
    async fn query_version(&self, endpoint: &NodeEndpoint) -> Result<String, RpcError>;
}

/// Resolves an executable name to a path.
pub trait ExecutableLocator: Send + Sync {
    fn locate(&self, name: &str) -> Option<PathBuf>;
}
