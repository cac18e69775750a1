//! Node endpoint value object.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A reachable node address hosting the status/version RPC service.
///
/// Immutable once built. The `name` is what the report shows in the
/// Node column; it defaults to the host when the endpoint string does not
/// carry an explicit `name=` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeEndpoint {
    name: String,
    host: String,
    port: u16,
}

impl NodeEndpoint {
    /// Create an endpoint with an explicit display name.
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host name or IP address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port of the RPC service.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` form handed to the RPC client.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NodeEndpoint {
    type Err = ConfigError;

    /// Parse `host:port` or `name=host:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidEndpoint(s.to_string());

        let trimmed = s.trim();
        let (name, addr) = match trimmed.split_once('=') {
            Some((name, addr)) => (Some(name.trim()), addr.trim()),
            None => (None, trimmed),
        };

        let (host, port) = addr.rsplit_once(':').ok_or_else(invalid)?;
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(invalid());
        }
        let port: u16 = port.parse().map_err(|_| invalid())?;
        if port == 0 {
            return Err(invalid());
        }

        let name = match name {
            Some("") => return Err(invalid()),
            Some(name) => name,
            None => host,
        };

        Ok(Self::new(name, host, port))
    }
}
