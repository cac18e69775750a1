//! Node health classification.
//!
//! A pure, total function over [`NodeStatus`]. The synced and verified gaps
//! are measured against the node's own synced layer.

use std::fmt;

use super::status::NodeStatus;

/// Largest layer gap, exclusive, still considered in sync.
pub const SYNC_TOLERANCE: u64 = 3;

/// Derived health label of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    NotConnected,
    NotSynced,
    Synced,
    SyncedAndVerified,
}

impl Classification {
    /// Text shown in the Status column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotConnected => "NOT CONNECTED",
            Self::NotSynced => "NOT SYNCED",
            Self::Synced => "SYNCED",
            Self::SyncedAndVerified => "SYNCED & VERIFIED",
        }
    }

    /// True for `Synced` and `SyncedAndVerified`.
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced | Self::SyncedAndVerified)
    }

    /// True only for `SyncedAndVerified`.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::SyncedAndVerified)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a node from its layer metrics.
///
/// Verified is only evaluated once the synced condition holds, so a
/// verified node is always synced as well.
pub fn classify(status: &NodeStatus) -> Classification {
    let Some((top, synced, verified)) = status.layers() else {
        return Classification::NotConnected;
    };

    if top.abs_diff(synced) >= SYNC_TOLERANCE {
        return Classification::NotSynced;
    }

    if verified.abs_diff(synced) < SYNC_TOLERANCE {
        Classification::SyncedAndVerified
    } else {
        Classification::Synced
    }
}
