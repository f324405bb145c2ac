#![allow(unused_imports)]

pub mod builders;
pub mod dns_server_mock;

pub use builders::{parse, QueryBuilder, EXAMPLE_ZONE};
pub use dns_server_mock::{MockBehavior, MockDnsServer};
