pub mod dispatch_query;

pub use dispatch_query::{AnswerSource, QueryDispatcher, QueryOutcome};
