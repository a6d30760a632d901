use std::time::{Duration, Instant};

use crate::client::sanitize_error;
use crate::error::QueryError;
use crate::models::{
    BatchError, BatchResult, HistoryEntry, OqlRequest, QueryExecutionResult, QueryMetadata,
    ValidationVerdict,
};
use crate::oql::{parsed_query, records_from_response, validate_query_with_limit};
use crate::state::AppState;

/// Check a query before submission, using the configured length ceiling
pub fn validate_oql(query: &str, state: &AppState) -> ValidationVerdict {
    validate_query_with_limit(query, state.settings.max_query_length)
}

/// Execute a single OQL query and record the attempt in history.
///
/// The history entry is written before any error is returned, so failed
/// attempts are always accounted for.
pub async fn execute_query(
    credential: &str,
    query: &str,
    state: &AppState,
) -> Result<QueryExecutionResult, QueryError> {
    let request = OqlRequest {
        query: query.to_string(),
    };

    let start = Instant::now();
    let response = state.transport.post_query(credential, &request).await;
    let execution_time_ms = start.elapsed().as_millis() as u64;

    let outcome = response.and_then(|body| {
        let records = records_from_response(&body)?;
        Ok((records, parsed_query(&body)))
    });

    match outcome {
        Ok((records, parsed_query)) => {
            // Count what we actually received, not what the service claims
            let record_count = records.len();
            let entry = HistoryEntry::succeeded(query, execution_time_ms, record_count);
            let query_id = entry.id.clone();
            let executed_at = entry.executed_at.clone();
            state.record_history(entry);

            log::info!(
                "Query {} returned {} records in {} ms",
                query_id,
                record_count,
                execution_time_ms
            );

            Ok(QueryExecutionResult {
                query_id,
                records,
                execution_time_ms,
                record_count,
                metadata: QueryMetadata {
                    query: query.to_string(),
                    parsed_query,
                    executed_at,
                },
            })
        }
        Err(e) => {
            let message = sanitize_error(&e.to_string(), credential);
            state.record_history(HistoryEntry::failed(query, execution_time_ms, message.clone()));
            log::warn!("Query failed after {} ms: {}", execution_time_ms, message);
            Err(e)
        }
    }
}

/// Execute queries one at a time, collecting failures instead of
/// aborting on them. A configurable pause separates consecutive queries.
pub async fn execute_batch<S: AsRef<str>>(
    credential: &str,
    queries: &[S],
    state: &AppState,
) -> BatchResult {
    let start = Instant::now();
    let delay = Duration::from_millis(state.settings.batch_delay_ms);

    let mut results = Vec::with_capacity(queries.len());
    let mut errors = Vec::new();

    for (index, query) in queries.iter().enumerate() {
        let query = query.as_ref();
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match execute_query(credential, query, state).await {
            Ok(result) => results.push(result),
            Err(e) => errors.push(BatchError {
                query: query.to_string(),
                error: sanitize_error(&e.to_string(), credential),
            }),
        }
    }

    let total_time_ms = start.elapsed().as_millis() as u64;
    log::info!(
        "Batch of {} queries finished in {} ms ({} failed)",
        queries.len(),
        total_time_ms,
        errors.len()
    );

    BatchResult {
        success_count: results.len(),
        error_count: errors.len(),
        results,
        total_time_ms,
        errors,
    }
}

/// Race a query against a deadline.
///
/// The execution runs as its own task. If the deadline wins, that task
/// is detached rather than aborted: the remote call may still complete
/// and will still write its history entry.
pub async fn execute_with_timeout(
    credential: &str,
    query: &str,
    timeout: Duration,
    state: &AppState,
) -> Result<QueryExecutionResult, QueryError> {
    let task_state = state.clone();
    let credential = credential.to_string();
    let query = query.to_string();

    let execution =
        tokio::spawn(async move { execute_query(&credential, &query, &task_state).await });

    tokio::select! {
        joined = execution => joined.map_err(|e| QueryError::Task(e.to_string()))?,
        _ = tokio::time::sleep(timeout) => {
            let timeout_ms = timeout.as_millis() as u64;
            log::warn!("Query still running after {} ms; no longer waiting for it", timeout_ms);
            Err(QueryError::Timeout(timeout_ms))
        }
    }
}
