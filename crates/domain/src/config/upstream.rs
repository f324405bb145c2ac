use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `host:port`, a bare IP (port 53) or a hostname resolved at startup.
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn upstream_addr(&self) -> Result<UpstreamAddr, DomainError> {
        UpstreamAddr::from_str(&self.address)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_address() -> String {
    "8.8.8.8:53".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Upstream server address that may or may not be resolved to an IP yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl UpstreamAddr {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            UpstreamAddr::Resolved(addr) => Some(*addr),
            UpstreamAddr::Unresolved { .. } => None,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            UpstreamAddr::Resolved(addr) => addr.port(),
            UpstreamAddr::Unresolved { port, .. } => *port,
        }
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

impl FromStr for UpstreamAddr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidUpstream(
                "Upstream address is empty".to_string(),
            ));
        }

        if let Ok(addr) = SocketAddr::from_str(s) {
            return Ok(UpstreamAddr::Resolved(addr));
        }

        let bare = s.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = IpAddr::from_str(bare) {
            return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }

        let (hostname, port) = match s.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| {
                        DomainError::InvalidUpstream(format!("Invalid port in '{}'", s))
                    })?;
                (host, port)
            }
            None => (s, DEFAULT_DNS_PORT),
        };

        if hostname.is_empty() || hostname.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(DomainError::InvalidUpstream(format!(
                "Invalid hostname in '{}'",
                s
            )));
        }

        Ok(UpstreamAddr::Unresolved {
            hostname: Arc::from(hostname),
            port,
        })
    }
}
