use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{sanitize_error, OqlTransport};
use crate::error::QueryError;
use crate::models::{ClientSettings, OqlRequest};

/// Posts queries to the OQL service over HTTP(S)
pub struct HttpTransport {
    client: Client,
    query_url: String,
}

impl HttpTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()
            .map_err(|e| QueryError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            query_url: settings.query_url(),
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    async fn send(&self, credential: &str, request: &OqlRequest) -> Result<Value, QueryError> {
        log::debug!("POST {} ({} chars)", self.query_url, request.query.len());

        let response = self
            .client
            .post(&self.query_url)
            .header("Authorization", format!("Bearer {}", credential))
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| QueryError::Network(sanitize_error(&e.to_string(), credential)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Network(sanitize_error(&e.to_string(), credential)))?;

        if !status.is_success() {
            return Err(QueryError::Remote {
                status: status.as_u16(),
                body: sanitize_error(&body, credential),
            });
        }

        // An empty 2xx body means the query matched nothing
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| QueryError::MalformedResponse(format!("Response is not valid JSON: {}", e)))
    }
}

impl OqlTransport for HttpTransport {
    fn post_query<'a>(
        &'a self,
        credential: &'a str,
        request: &'a OqlRequest,
    ) -> BoxFuture<'a, Result<Value, QueryError>> {
        Box::pin(self.send(credential, request))
    }
}
