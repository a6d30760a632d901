pub mod query;
pub mod query_history;
pub mod statistics;

pub use query::*;
pub use query_history::*;
pub use statistics::*;
