//! Node Poller
//!
//! Queries every endpoint once per cycle through the injected [`NodeRpc`].
//! At most `concurrency` queries are in flight; results come back in
//! endpoint order regardless of completion order.

use std::sync::Arc;

use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, error, info, warn};

use crate::config::{PollerConfig, VersionPolicy};
use crate::domain::{NodeEndpoint, NodeStatus};
use crate::error::PollError;
use crate::ports::{FleetMonitorApi, NodeRpc};

/// Poller implementing [`FleetMonitorApi`] on top of an RPC client.
pub struct NodePoller<R: NodeRpc> {
    rpc: Arc<R>,
    config: PollerConfig,
}

impl<R: NodeRpc> NodePoller<R> {
    /// Create a poller with the default configuration.
    pub fn new(rpc: Arc<R>) -> Self {
        Self::with_config(rpc, PollerConfig::default())
    }

    pub fn with_config(rpc: Arc<R>, config: PollerConfig) -> Self {
        Self { rpc, config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Poll a single node: status first, then version when asked for and
    /// the node answered.
    async fn poll_node(
        &self,
        endpoint: NodeEndpoint,
        include_version: bool,
    ) -> Result<NodeStatus, PollError> {
        let status = match self.rpc.query_status(&endpoint).await {
            Ok(raw) => NodeStatus::from_raw(endpoint, raw),
            Err(e) => {
                warn!(endpoint = %endpoint, kind = ?e.kind(), error = %e, "Status query failed");
                return Ok(NodeStatus::disconnected(endpoint));
            }
        };

        if !status.connected {
            warn!(endpoint = %status.endpoint, "Status reply without a full layer triple");
            return Ok(status);
        }

        debug!(
            endpoint = %status.endpoint,
            top = ?status.top_layer,
            synced = ?status.synced_layer,
            verified = ?status.verified_layer,
            "Status received"
        );

        if !include_version {
            return Ok(status);
        }

        match self.rpc.query_version(&status.endpoint).await {
            Ok(version) => Ok(status.with_version(version)),
            Err(e) => match self.config.version_policy {
                VersionPolicy::Abort => {
                    error!(endpoint = %status.endpoint, error = %e, "Version query failed, aborting cycle");
                    Err(PollError::VersionQuery {
                        endpoint: status.endpoint.to_string(),
                        source: e,
                    })
                }
                VersionPolicy::Degrade => {
                    warn!(endpoint = %status.endpoint, error = %e, "Version query failed");
                    Ok(status)
                }
            },
        }
    }
}

#[async_trait]
impl<R: NodeRpc + 'static> FleetMonitorApi for NodePoller<R> {
    async fn poll(
        &self,
        endpoints: &[NodeEndpoint],
        include_version: bool,
    ) -> Result<Vec<NodeStatus>, PollError> {
        info!(
            nodes = endpoints.len(),
            concurrency = self.config.concurrency,
            include_version,
            "Starting poll cycle"
        );

        let statuses: Vec<NodeStatus> = stream::iter(endpoints.iter().cloned())
            .map(|endpoint| self.poll_node(endpoint, include_version))
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        info!(
            nodes = statuses.len(),
            connected = statuses.iter().filter(|s| s.connected).count(),
            "Poll cycle complete"
        );
        Ok(statuses)
    }
}
