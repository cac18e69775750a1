//! Per-node poll results.

use super::endpoint::NodeEndpoint;

/// Metrics reported by a node's `Status` call, as decoded from the wire.
///
/// Every field is optional: the remote service omits what it does not know.
/// Validation (all-or-nothing layers) happens when this is folded into a
/// [`NodeStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStatus {
    pub connected_peers: Option<u64>,
    pub top_layer: Option<u64>,
    pub synced_layer: Option<u64>,
    pub verified_layer: Option<u64>,
}

/// Result of polling one endpoint during one poll cycle.
///
/// ## Invariants
///
/// - `connected == false` implies every numeric field is `None`.
/// - `top_layer`, `synced_layer` and `verified_layer` are all present or all
///   absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub endpoint: NodeEndpoint,
    pub connected: bool,
    pub top_layer: Option<u64>,
    pub synced_layer: Option<u64>,
    pub verified_layer: Option<u64>,
    pub connected_peers: Option<u64>,
    pub version: Option<String>,
}

impl NodeStatus {
    /// Record for a node whose status query failed.
    pub fn disconnected(endpoint: NodeEndpoint) -> Self {
        Self {
            endpoint,
            connected: false,
            top_layer: None,
            synced_layer: None,
            verified_layer: None,
            connected_peers: None,
            version: None,
        }
    }

    /// Record for a node that answered its status query.
    ///
    /// A payload missing any of the three layer numbers is not trusted: the
    /// node is recorded as disconnected.
    pub fn from_raw(endpoint: NodeEndpoint, raw: RawStatus) -> Self {
        match (raw.top_layer, raw.synced_layer, raw.verified_layer) {
            (Some(top), Some(synced), Some(verified)) => Self {
                endpoint,
                connected: true,
                top_layer: Some(top),
                synced_layer: Some(synced),
                verified_layer: Some(verified),
                connected_peers: raw.connected_peers,
                version: None,
            },
            _ => Self::disconnected(endpoint),
        }
    }

    /// Attach the node software version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// `(top, synced, verified)` when the node reported a full layer triple.
    pub fn layers(&self) -> Option<(u64, u64, u64)> {
        if !self.connected {
            return None;
        }
        match (self.top_layer, self.synced_layer, self.verified_layer) {
            (Some(top), Some(synced), Some(verified)) => Some((top, synced, verified)),
            _ => None,
        }
    }
}
