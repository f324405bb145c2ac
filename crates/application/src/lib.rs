//! Zonegate Application Layer
//!
//! Ports the infrastructure implements and the query dispatch use case
//! that drives them.
pub mod ports;
pub mod use_cases;
