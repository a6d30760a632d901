use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CanonicalRecord;

/// Envelope posted to the OQL service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OqlRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetadata {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_query: Option<String>,
    pub executed_at: String, // ISO 8601
}

/// Outcome of one successfully executed query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryExecutionResult {
    pub query_id: String,
    /// Records keyed by record identifier
    pub records: HashMap<String, CanonicalRecord>,
    pub execution_time_ms: u64,
    /// Always `records.len()`, whatever the service claimed
    pub record_count: usize,
    pub metadata: QueryMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    pub query: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Successful results, in the order the queries were supplied
    pub results: Vec<QueryExecutionResult>,
    pub total_time_ms: u64,
    pub success_count: usize,
    pub error_count: usize,
    /// Failures, in the order they were encountered
    pub errors: Vec<BatchError>,
}
