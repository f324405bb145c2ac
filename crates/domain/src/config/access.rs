use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessConfig {
    /// Client addresses or CIDR networks admitted by the server.
    #[serde(default = "default_allowed_clients")]
    pub allowed_clients: Vec<String>,

    /// Requests per client tolerated inside one window.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl AccessConfig {
    /// Parses the allow-list; a bare address becomes a single-host network.
    pub fn allowed_networks(&self) -> Result<Vec<IpNetwork>, String> {
        self.allowed_clients
            .iter()
            .map(|entry| parse_network(entry))
            .collect()
    }
}

fn parse_network(entry: &str) -> Result<IpNetwork, String> {
    let entry = entry.trim();
    if let Ok(ip) = IpAddr::from_str(entry) {
        return Ok(IpNetwork::from(ip));
    }
    IpNetwork::from_str(entry).map_err(|e| format!("Invalid allow-list entry '{}': {}", entry, e))
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            allowed_clients: default_allowed_clients(),
            rate_limit: default_rate_limit(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_allowed_clients() -> Vec<String> {
    vec!["127.0.0.1".to_string(), "192.168.1.100".to_string()]
}

fn default_rate_limit() -> u32 {
    100
}

fn default_window_secs() -> u64 {
    60
}
