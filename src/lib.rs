//! Execution and monitoring core for Object Query Language (OQL) queries.
//!
//! Queries are built and validated locally, submitted to the remote OQL
//! service through an [`OqlTransport`], normalized into
//! [`CanonicalRecord`]s, and recorded in a bounded in-memory history that
//! feeds the statistics and health commands.

pub mod client;
pub mod commands;
pub mod error;
pub mod history;
pub mod models;
pub mod oql;
pub mod state;

pub use client::{HttpTransport, OqlTransport};
pub use error::QueryError;
pub use history::QueryHistory;
pub use models::*;
pub use oql::{build_match, build_select, escape_string, validate_query, MatchQuery, SelectQuery};
pub use state::AppState;

/// Install an `env_logger` backend at `Info`, overridable through `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
