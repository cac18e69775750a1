//! Test doubles for the outbound ports.
//!
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use pn_monitor::test_utils::MockNodeRpc;
//!
//! let rpc = MockNodeRpc::new()
//!     .with_layers("n1:9092", 100, 99, 98, 5)
//!     .with_version("n1:9092", "v1.6.3");
//! assert_eq!(rpc.status_calls(), 0);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{NodeEndpoint, RawStatus};
use crate::error::RpcError;
use crate::ports::{ExecutableLocator, NodeRpc};

#[derive(Debug, Clone, Default)]
struct ScriptedNode {
    status: Option<RawStatus>,
    version: Option<String>,
    delay: Duration,
}

/// Scripted [`NodeRpc`], keyed by `host:port`.
///
/// Unknown endpoints fail with a connection error; a node without a
/// scripted version fails its version query with a parse error. A delay,
/// if set, is slept before each reply of that node.
#[derive(Debug, Default)]
pub struct MockNodeRpc {
    nodes: HashMap<String, ScriptedNode>,
    status_calls: AtomicUsize,
    version_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    call_log: Mutex<Vec<String>>,
}

impl MockNodeRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to status queries for `address` with `raw`.
    pub fn with_status(mut self, address: &str, raw: RawStatus) -> Self {
        self.nodes.entry(address.to_string()).or_default().status = Some(raw);
        self
    }

    /// Reply with a complete status: all three layers and a peer count.
    pub fn with_layers(self, address: &str, top: u64, synced: u64, verified: u64, peers: u64) -> Self {
        self.with_status(
            address,
            RawStatus {
                connected_peers: Some(peers),
                top_layer: Some(top),
                synced_layer: Some(synced),
                verified_layer: Some(verified),
            },
        )
    }

    pub fn with_version(mut self, address: &str, version: &str) -> Self {
        self.nodes.entry(address.to_string()).or_default().version = Some(version.to_string());
        self
    }

    pub fn with_delay(mut self, address: &str, delay: Duration) -> Self {
        self.nodes.entry(address.to_string()).or_default().delay = delay;
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn version_calls(&self) -> usize {
        self.version_calls.load(Ordering::SeqCst)
    }

    /// Highest number of queries that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// `method address` of every query, in the order they started.
    pub fn call_log(&self) -> Vec<String> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    async fn enter(&self, method: &str, endpoint: &NodeEndpoint) -> ScriptedNode {
        let address = endpoint.address();
        if let Ok(mut log) = self.call_log.lock() {
            log.push(format!("{method} {address}"));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let node = self.nodes.get(&address).cloned().unwrap_or_default();
        if !node.delay.is_zero() {
            tokio::time::sleep(node.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        node
    }
}

#[async_trait]
impl NodeRpc for MockNodeRpc {
    async fn query_status(&self, endpoint: &NodeEndpoint) -> Result<RawStatus, RpcError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let node = self.enter("status", endpoint).await;
        node.status.ok_or_else(|| RpcError::Connection {
            address: endpoint.address(),
            message: "connection refused".to_string(),
        })
    }

    async fn query_version(&self, endpoint: &NodeEndpoint) -> Result<String, RpcError> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        let node = self.enter("version", endpoint).await;
        node.version.ok_or_else(|| RpcError::Parse {
            address: endpoint.address(),
            message: "reply carries no version string".to_string(),
        })
    }
}

/// [`ExecutableLocator`] answering from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    paths: HashMap<String, PathBuf>,
}

impl FixedLocator {
    /// A locator that finds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(name.to_string(), path.into());
        self
    }
}

impl ExecutableLocator for FixedLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.paths.get(name).cloned()
    }
}
