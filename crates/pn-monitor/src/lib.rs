//! # pn-monitor
//!
//! Health monitor for a fleet of public Spacemesh nodes.
//!
//! Each cycle queries every node's status (and optionally its version),
//! classifies the node by how far its synced and verified layers trail the
//! top layer, and renders a width-bounded table plus a fleet summary.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `NodeEndpoint`, `NodeStatus`: what was asked and what came back
//!   - `classify`: the four-state health classification
//!   - `FleetSummary`, `PollCycleResult`: per-cycle aggregates
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `FleetMonitorApi`: Driving port (poll a fleet once)
//!   - `NodeRpc`: Driven port (status and version queries)
//!   - `ExecutableLocator`: Driven port (find the RPC tool)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `NodePoller`: Implements `FleetMonitorApi` with bounded, ordered concurrency
//!   - `HealthCheck`: poll, classify, render
//!
//! - **Render Layer** (`render/`): Column model, two-pass table, framed report
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `GrpcurlClient`: `NodeRpc` over the grpcurl command-line tool
//!   - `SearchPathLocator`: `ExecutableLocator` over directories and `PATH`
//!   - `GrpcurlBootstrap`: downloads a grpcurl release when none is installed
//!
//! ## Classification
//!
//! With `d(a, b) = |a - b|` and a tolerance of 3 layers:
//!
//! - not connected: the node did not answer with all three layers
//! - synced: `d(top, synced) < 3`
//! - synced & verified: synced and `d(synced, verified) < 3`
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pn_monitor::{GrpcurlClient, HealthCheck, MonitorConfig, NodePoller};
//!
//! let config = MonitorConfig::from_env()?;
//! let client = Arc::new(GrpcurlClient::with_timeout("/usr/bin/grpcurl", config.timeout));
//! let poller = NodePoller::with_config(client, config.poller.clone());
//!
//! let check = HealthCheck::new(poller, config.endpoints.clone(), config.include_version, 80);
//! for line in check.run().await?.lines {
//!     println!("{line}");
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod render;
pub mod service;

/// Test doubles (MockNodeRpc, FixedLocator)
/// Requires feature: `test-utils`
#[cfg(feature = "test-utils")]
pub mod test_utils;

// Domain
pub use domain::{
    classify, summarize, Classification, FleetSummary, NodeEndpoint, NodeStatus,
    PollCycleResult, RawStatus, SYNC_TOLERANCE,
};

// Ports
pub use ports::{ExecutableLocator, FleetMonitorApi, NodeRpc};

// Service
pub use service::{HealthCheck, HealthReport, NodePoller};

// Rendering
pub use render::{ReportRenderer, REPORT_TITLE};

// Adapters
pub use adapters::{resolve_grpcurl, GrpcurlBootstrap, GrpcurlClient, SearchPathLocator};

// Configuration and errors
pub use config::{MonitorConfig, PollerConfig, VersionPolicy};
pub use error::{
    BootstrapError, ConfigError, FailureKind, MonitorError, PollError, RpcError,
};

#[cfg(feature = "test-utils")]
pub use test_utils::{FixedLocator, MockNodeRpc};
