use serde::{Deserialize, Serialize};

use super::HistoryEntry;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryFrequency {
    pub query: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryStatistics {
    pub total_queries: usize,
    pub successful_queries: usize,
    pub failed_queries: usize,
    /// Mean over successful executions only
    pub average_execution_time_ms: f64,
    /// Mean over successful executions only
    pub average_record_count: f64,
    pub most_frequent_queries: Vec<QueryFrequency>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub fastest_query: Option<HistoryEntry>,
    pub slowest_query: Option<HistoryEntry>,
    pub average_execution_time_ms: f64,
    pub p95_execution_time_ms: u64,
    pub slow_query_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "healthy"),
            HealthState::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub query_execution: bool,
    /// Mirrors `query_execution`; graph sync is not probed on its own
    pub graph_sync: bool,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: String, // ISO 8601
}
