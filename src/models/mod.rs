pub mod query;
pub mod query_history;
pub mod record;
pub mod settings;
pub mod statistics;
pub mod validation;

pub use query::*;
pub use query_history::*;
pub use record::*;
pub use settings::*;
pub use statistics::*;
pub use validation::*;
