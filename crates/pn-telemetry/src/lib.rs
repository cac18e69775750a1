//! # pn-telemetry
//!
//! Logging for the public-nodes health monitor.
//!
//! Everything goes to stderr so the report on stdout can be piped cleanly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pn_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! tracing::info!("ready");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PN_LOG_LEVEL` or `RUST_LOG` | `warn` | Log filter directive |
//! | `PN_JSON_LOGS` | `false` | One JSON object per line |
//! | `PN_LOG_ANSI` | `true` | Colored human-readable output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),
}
