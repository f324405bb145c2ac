use crate::errors::DomainError;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A normalized DNS name: lowercase, no trailing dot.
///
/// Normalization happens once at construction so the derived `Eq` and
/// `Hash` are case-insensitive and ignore the trailing dot. The root name
/// is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName(Arc<str>);

impl DomainName {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);

        if trimmed.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "{} exceeds {} characters",
                name, MAX_NAME_LEN
            )));
        }

        if !trimmed.is_empty() {
            for label in trimmed.split('.') {
                if label.is_empty() {
                    return Err(DomainError::InvalidDomainName(format!(
                        "{} contains an empty label",
                        name
                    )));
                }
                if label.len() > MAX_LABEL_LEN {
                    return Err(DomainError::InvalidDomainName(format!(
                        "{} has a label longer than {} characters",
                        name, MAX_LABEL_LEN
                    )));
                }
            }
        }

        Ok(Self(Arc::from(trimmed.to_ascii_lowercase())))
    }

    pub fn root() -> Self {
        Self(Arc::from(""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Fully qualified form with the trailing dot, as used on the wire.
    pub fn to_fqdn(&self) -> String {
        format!("{}.", self.0)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DomainName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DomainName::new(&raw).map_err(serde::de::Error::custom)
    }
}
