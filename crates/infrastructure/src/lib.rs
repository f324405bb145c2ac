//! Zonegate Infrastructure Layer
//!
//! Adapters behind the application ports: the in-memory zone, the response
//! cache, the access gate, the UDP upstream forwarder and the wire-format
//! request handler.
pub mod dns;
