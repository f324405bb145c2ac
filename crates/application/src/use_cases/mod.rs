pub mod dns;

pub use dns::{AnswerSource, QueryDispatcher, QueryOutcome};
