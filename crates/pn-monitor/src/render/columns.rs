//! Column model of the status table.

use crate::domain::{Classification, NodeStatus};

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Which value a column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Node,
    Port,
    Version,
    Status,
    Peers,
    TopLayer,
    SyncedLayer,
    VerifiedLayer,
}

impl ColumnKey {
    /// Every column, in display order.
    pub const ALL: [ColumnKey; 8] = [
        ColumnKey::Node,
        ColumnKey::Port,
        ColumnKey::Version,
        ColumnKey::Status,
        ColumnKey::Peers,
        ColumnKey::TopLayer,
        ColumnKey::SyncedLayer,
        ColumnKey::VerifiedLayer,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Port => "Port",
            Self::Version => "Version",
            Self::Status => "Status",
            Self::Peers => "Peers",
            Self::TopLayer => "Top",
            Self::SyncedLayer => "Synced",
            Self::VerifiedLayer => "Verified",
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            Self::Node | Self::Version | Self::Status => Alignment::Left,
            Self::Port | Self::Peers | Self::TopLayer | Self::SyncedLayer | Self::VerifiedLayer => {
                Alignment::Right
            }
        }
    }

    /// Cell text for one node. Absent values render as an empty string,
    /// never as `0`.
    pub fn value(&self, status: &NodeStatus, classification: Classification) -> String {
        fn opt(v: Option<u64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        match self {
            Self::Node => status.endpoint.name().to_string(),
            Self::Port => status.endpoint.port().to_string(),
            Self::Version => status.version.clone().unwrap_or_default(),
            Self::Status => classification.label().to_string(),
            Self::Peers => opt(status.connected_peers),
            Self::TopLayer => opt(status.top_layer),
            Self::SyncedLayer => opt(status.synced_layer),
            Self::VerifiedLayer => opt(status.verified_layer),
        }
    }
}

/// One display column and its width accumulator for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub display_name: &'static str,
    pub enabled: bool,
    pub alignment: Alignment,
    pub width: usize,
}

impl ColumnSpec {
    pub fn new(key: ColumnKey) -> Self {
        let display_name = key.display_name();
        Self {
            key,
            display_name,
            enabled: true,
            alignment: key.alignment(),
            width: console::measure_text_width(display_name),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Back to the header width, the floor of every cycle.
    pub fn reset_width(&mut self) {
        self.width = console::measure_text_width(self.display_name);
    }

    /// Grow to fit `cell`; never shrinks.
    pub fn fit(&mut self, cell: &str) {
        self.width = self.width.max(console::measure_text_width(cell));
    }
}

/// Fresh column set for one cycle. The Version column is only enabled when
/// version reporting was requested.
pub fn default_columns(include_version: bool) -> Vec<ColumnSpec> {
    ColumnKey::ALL
        .iter()
        .map(|key| {
            let column = ColumnSpec::new(*key);
            if *key == ColumnKey::Version && !include_version {
                column.disabled()
            } else {
                column
            }
        })
        .collect()
}
