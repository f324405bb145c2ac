use std::fmt;
use thiserror::Error;

/// Why the access gate refused a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDenial {
    NotAllowed,
    RateLimited,
}

impl fmt::Display for AdmissionDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionDenial::NotAllowed => write!(f, "client not on allow-list"),
            AdmissionDenial::RateLimited => write!(f, "client over rate limit"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Admission denied: {0}")]
    AdmissionDenied(AdmissionDenial),

    #[error("Upstream query timeout")]
    UpstreamTimeout,

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid zone entry for {domain}: {reason}")]
    InvalidZoneEntry { domain: String, reason: String },

    #[error("Failed to load zone: {0}")]
    ZoneLoad(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),
}

impl DomainError {
    /// Short status label used in query log lines.
    pub fn status(&self) -> &'static str {
        match self {
            DomainError::AdmissionDenied(AdmissionDenial::NotAllowed) => "NOT_ALLOWED",
            DomainError::AdmissionDenied(AdmissionDenial::RateLimited) => "RATE_LIMITED",
            DomainError::UpstreamTimeout => "TIMEOUT",
            DomainError::UpstreamError(_) => "UPSTREAM_ERROR",
            _ => "ERROR",
        }
    }
}
