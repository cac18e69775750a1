//! Fleet-wide tallies and the per-cycle result aggregate.

use std::fmt;

use super::classification::{classify, Classification};
use super::status::NodeStatus;

/// Aggregate counts over one poll cycle.
///
/// `not_synced` folds never-connected nodes in with out-of-sync ones.
/// `synced` includes verified nodes. `total` is the endpoint count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub not_synced: usize,
    pub synced: usize,
    pub verified: usize,
    pub total: usize,
}

impl FleetSummary {
    /// Fold one classification into the tally.
    pub fn record(&mut self, classification: Classification) {
        self.total += 1;
        match classification {
            Classification::NotConnected | Classification::NotSynced => self.not_synced += 1,
            Classification::Synced => self.synced += 1,
            Classification::SyncedAndVerified => {
                self.synced += 1;
                self.verified += 1;
            }
        }
    }
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Not synced: {}/{}, Synced: {}/{}, Verified: {}/{}",
            self.not_synced, self.total, self.synced, self.total, self.verified, self.total
        )
    }
}

/// Tally a set of classifications.
pub fn summarize(classifications: &[Classification]) -> FleetSummary {
    classifications
        .iter()
        .fold(FleetSummary::default(), |mut summary, c| {
            summary.record(*c);
            summary
        })
}

/// Everything one poll cycle produced, owned by the orchestrator until the
/// report is written. Built fresh every cycle.
#[derive(Debug, Clone)]
pub struct PollCycleResult {
    statuses: Vec<NodeStatus>,
    classifications: Vec<Classification>,
}

impl PollCycleResult {
    /// Classify every status, preserving endpoint order.
    pub fn new(statuses: Vec<NodeStatus>) -> Self {
        let classifications = statuses.iter().map(classify).collect();
        Self {
            statuses,
            classifications,
        }
    }

    pub fn statuses(&self) -> &[NodeStatus] {
        &self.statuses
    }

    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    /// Number of nodes whose status query succeeded.
    pub fn connected_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.connected).count()
    }

    pub fn summary(&self) -> FleetSummary {
        summarize(&self.classifications)
    }
}
