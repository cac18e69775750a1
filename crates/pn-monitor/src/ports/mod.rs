//! Ports layer: traits at the edges of the monitor.

pub mod inbound;
pub mod outbound;

pub use inbound::FleetMonitorApi;
pub use outbound::{ExecutableLocator, NodeRpc};
