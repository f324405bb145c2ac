use crate::zone::DEFAULT_TTL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// JSON zone document loaded once at startup. No file means an empty zone.
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            file: None,
            default_ttl: default_ttl(),
        }
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}
