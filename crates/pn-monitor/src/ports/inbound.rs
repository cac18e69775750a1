//! Inbound Ports (Driving Ports)
//!
//! The API the CLI and tests drive a poll cycle through.

use async_trait::async_trait;

use crate::domain::{NodeEndpoint, NodeStatus};
use crate::error::PollError;

/// Poll a fleet of nodes once.
#[async_trait]
pub trait FleetMonitorApi: Send + Sync {
    /// Query every endpoint and return one status per endpoint, in list order.
    ///
    /// Status failures never surface here: the node is recorded as
    /// disconnected. Only a version failure under the strict policy aborts
    /// the cycle.
    async fn poll(
        &self,
        endpoints: &[NodeEndpoint],
        include_version: bool,
    ) -> Result<Vec<NodeStatus>, PollError>;
}
