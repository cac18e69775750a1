//! Service layer: wires the domain to the RPC port.

mod health_check;
mod poller;

pub use health_check::{HealthCheck, HealthReport};
pub use poller::NodePoller;
