//! Domain layer: pure fleet-health logic, no I/O.

pub mod classification;
pub mod endpoint;
pub mod status;
pub mod summary;

pub use classification::{classify, Classification, SYNC_TOLERANCE};
pub use endpoint::NodeEndpoint;
pub use status::{NodeStatus, RawStatus};
pub use summary::{summarize, FleetSummary, PollCycleResult};
