use crate::models::HistoryEntry;
use crate::state::AppState;

/// Every recorded attempt, most recent first
pub fn get_query_history(state: &AppState) -> Vec<HistoryEntry> {
    state.history_snapshot()
}

/// Load query history entries with optional filtering
pub fn load_query_history(
    search: Option<&str>,
    limit: Option<usize>,
    offset: Option<usize>,
    state: &AppState,
) -> Vec<HistoryEntry> {
    let history = state.history();
    let limit = limit.unwrap_or_else(|| history.capacity());
    history.search(search, limit, offset.unwrap_or(0))
}

pub fn recent_successful_queries(limit: usize, state: &AppState) -> Vec<HistoryEntry> {
    state.history().recent_successful(limit)
}

pub fn get_query_history_entry(entry_id: &str, state: &AppState) -> Option<HistoryEntry> {
    state.history().get(entry_id)
}

/// Delete a single query history entry
pub fn delete_query_history_entry(entry_id: &str, state: &AppState) -> bool {
    state.history().remove(entry_id)
}

/// Clear all query history
pub fn clear_query_history(state: &AppState) {
    state.history().clear();
    log::info!("Query history cleared");
}
