use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::QueryError;
use crate::models::OqlRequest;

pub mod http;
pub mod redact;

pub use http::HttpTransport;
pub use redact::sanitize_error;

/// Submits one query envelope to the OQL service on behalf of a bearer
/// credential and returns the decoded JSON body (`Value::Null` when the
/// service sent no body).
pub trait OqlTransport: Send + Sync {
    fn post_query<'a>(
        &'a self,
        credential: &'a str,
        request: &'a OqlRequest,
    ) -> BoxFuture<'a, Result<Value, QueryError>>;
}
