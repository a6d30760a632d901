use thiserror::Error;

/// Failures raised while submitting a query to the OQL service.
///
/// Validation problems are never reported through this type; they are
/// returned as a [`ValidationVerdict`](crate::models::ValidationVerdict).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The service answered with a non-2xx status
    #[error("OQL service returned {status}: {body}")]
    Remote { status: u16, body: String },

    /// The request never produced a status (connect, TLS, IO, client timeout)
    #[error("Failed to reach OQL service: {0}")]
    Network(String),

    /// The response body did not have the expected shape
    #[error("Malformed OQL response: {0}")]
    MalformedResponse(String),

    /// The caller's deadline elapsed before the execution settled
    #[error("query execution timeout after {0} ms")]
    Timeout(u64),

    /// The spawned execution task panicked or was torn down by the runtime
    #[error("Query task failed: {0}")]
    Task(String),
}

impl QueryError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }
}
