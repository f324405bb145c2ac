pub mod record;
pub mod record_type;

pub use record::{MxData, RecordData, SrvData};
pub use record_type::RecordType;
