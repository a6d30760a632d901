use serde::{Deserialize, Serialize};

/// Audit record of one query attempt, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub query: String,
    pub executed_at: String, // ISO 8601
    pub execution_time_ms: u64,
    pub record_count: usize,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryEntry {
    pub fn succeeded(query: impl Into<String>, execution_time_ms: u64, record_count: usize) -> Self {
        HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.into(),
            executed_at: chrono::Utc::now().to_rfc3339(),
            execution_time_ms,
            record_count,
            success: true,
            error: None,
        }
    }

    /// Failed attempts always carry zero records and an error message
    pub fn failed(query: impl Into<String>, execution_time_ms: u64, error: impl Into<String>) -> Self {
        HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.into(),
            executed_at: chrono::Utc::now().to_rfc3339(),
            execution_time_ms,
            record_count: 0,
            success: false,
            error: Some(error.into()),
        }
    }
}
