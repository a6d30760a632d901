use std::collections::HashMap;
use std::time::Instant;

use super::query::execute_query;
use crate::models::{
    HealthState, HealthStatus, HistoryEntry, PerformanceMetrics, QueryFrequency, QueryStatistics,
};
use crate::state::AppState;

/// How many distinct queries `most_frequent_queries` reports
const TOP_QUERY_COUNT: usize = 10;

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn compute_statistics(entries: &[HistoryEntry]) -> QueryStatistics {
    let successful: Vec<&HistoryEntry> = entries.iter().filter(|e| e.success).collect();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *frequency.entry(entry.query.as_str()).or_insert(0) += 1;
    }
    let mut most_frequent_queries: Vec<QueryFrequency> = frequency
        .into_iter()
        .map(|(query, count)| QueryFrequency {
            query: query.to_string(),
            count,
        })
        .collect();
    most_frequent_queries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.query.cmp(&b.query)));
    most_frequent_queries.truncate(TOP_QUERY_COUNT);

    QueryStatistics {
        total_queries: entries.len(),
        successful_queries: successful.len(),
        failed_queries: entries.len() - successful.len(),
        average_execution_time_ms: mean(successful.iter().map(|e| e.execution_time_ms as f64)),
        average_record_count: mean(successful.iter().map(|e| e.record_count as f64)),
        most_frequent_queries,
    }
}

/// Successful entries slower than `threshold_ms`, slowest first
pub fn find_slow_queries(entries: &[HistoryEntry], threshold_ms: u64) -> Vec<HistoryEntry> {
    let mut slow: Vec<HistoryEntry> = entries
        .iter()
        .filter(|e| e.success && e.execution_time_ms > threshold_ms)
        .cloned()
        .collect();
    slow.sort_by(|a, b| b.execution_time_ms.cmp(&a.execution_time_ms));
    slow
}

/// Index of the 95th percentile in an ascending list of `len` samples
fn p95_index(len: usize) -> usize {
    (len * 95 / 100).min(len.saturating_sub(1))
}

pub fn compute_performance_metrics(entries: &[HistoryEntry], slow_threshold_ms: u64) -> PerformanceMetrics {
    let successful: Vec<&HistoryEntry> = entries.iter().filter(|e| e.success).collect();
    if successful.is_empty() {
        return PerformanceMetrics::default();
    }

    let mut durations: Vec<u64> = successful.iter().map(|e| e.execution_time_ms).collect();
    durations.sort_unstable();

    PerformanceMetrics {
        fastest_query: successful
            .iter()
            .min_by_key(|e| e.execution_time_ms)
            .map(|e| (*e).clone()),
        slowest_query: successful
            .iter()
            .max_by_key(|e| e.execution_time_ms)
            .map(|e| (*e).clone()),
        average_execution_time_ms: mean(durations.iter().map(|d| *d as f64)),
        p95_execution_time_ms: durations[p95_index(durations.len())],
        slow_query_count: durations.iter().filter(|d| **d > slow_threshold_ms).count(),
    }
}

/// Aggregate counts and averages over the current history
pub fn query_statistics(state: &AppState) -> QueryStatistics {
    compute_statistics(&state.history_snapshot())
}

pub fn slow_queries(threshold_ms: u64, state: &AppState) -> Vec<HistoryEntry> {
    find_slow_queries(&state.history_snapshot(), threshold_ms)
}

pub fn performance_metrics(state: &AppState) -> PerformanceMetrics {
    compute_performance_metrics(&state.history_snapshot(), state.settings.slow_query_threshold_ms)
}

/// Run the configured smoke query and report whether the service answered.
///
/// Never fails: an execution error is reported as `unhealthy` with the
/// elapsed time still filled in.
pub async fn health_check(credential: &str, state: &AppState) -> HealthStatus {
    let start = Instant::now();
    let result = execute_query(credential, &state.settings.health_check_query, state).await;
    let response_time_ms = start.elapsed().as_millis() as u64;
    let checked_at = chrono::Utc::now().to_rfc3339();

    match result {
        Ok(_) => HealthStatus {
            status: HealthState::Healthy,
            query_execution: true,
            // Only inferred from query execution succeeding
            graph_sync: true,
            response_time_ms,
            error: None,
            checked_at,
        },
        Err(e) => {
            log::warn!("OQL health check failed after {} ms: {}", response_time_ms, e);
            HealthStatus {
                status: HealthState::Unhealthy,
                query_execution: false,
                graph_sync: false,
                response_time_ms,
                error: Some(e.to_string()),
                checked_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(query: &str, ms: u64, records: usize) -> HistoryEntry {
        HistoryEntry::succeeded(query, ms, records)
    }

    fn failed(query: &str, ms: u64) -> HistoryEntry {
        HistoryEntry::failed(query, ms, "boom")
    }

    #[test]
    fn test_empty_history_aggregates_to_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, QueryStatistics::default());

        let metrics = compute_performance_metrics(&[], 5_000);
        assert!(metrics.fastest_query.is_none());
        assert!(metrics.slowest_query.is_none());
        assert_eq!(metrics.average_execution_time_ms, 0.0);
        assert_eq!(metrics.p95_execution_time_ms, 0);
        assert_eq!(metrics.slow_query_count, 0);
    }

    #[test]
    fn test_only_failures_average_to_zero() {
        let entries = vec![failed("a", 100), failed("b", 300)];
        let stats = compute_statistics(&entries);
        assert_eq!(stats.total_queries, 2);
        assert_eq!(stats.failed_queries, 2);
        assert_eq!(stats.average_execution_time_ms, 0.0);
        assert_eq!(stats.average_record_count, 0.0);
        assert_eq!(compute_performance_metrics(&entries, 5_000), PerformanceMetrics::default());
    }

    #[test]
    fn test_averages_use_successful_entries_only() {
        let entries = vec![ok("a", 100, 2), ok("b", 300, 4), failed("c", 10_000)];
        let stats = compute_statistics(&entries);
        assert_eq!(stats.total_queries, 3);
        assert_eq!(stats.successful_queries, 2);
        assert_eq!(stats.failed_queries, 1);
        assert_eq!(stats.average_execution_time_ms, 200.0);
        assert_eq!(stats.average_record_count, 3.0);
    }

    #[test]
    fn test_most_frequent_top_ten() {
        let mut entries = Vec::new();
        for i in 0..12 {
            for _ in 0..=i {
                entries.push(ok(&format!("q{:02}", i), 1, 0));
            }
        }
        entries.push(failed("q11", 1));

        let stats = compute_statistics(&entries);
        assert_eq!(stats.most_frequent_queries.len(), 10);
        assert_eq!(
            stats.most_frequent_queries[0],
            QueryFrequency {
                query: "q11".to_string(),
                count: 13
            }
        );
        assert_eq!(stats.most_frequent_queries[9].query, "q02");
        assert!(stats
            .most_frequent_queries
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_slow_queries_descending() {
        let entries = vec![ok("a", 50, 0), ok("b", 900, 0), failed("c", 5_000), ok("d", 400, 0)];
        let slow: Vec<String> = find_slow_queries(&entries, 100)
            .into_iter()
            .map(|e| e.query)
            .collect();
        assert_eq!(slow, vec!["b", "d"]);
        assert!(find_slow_queries(&entries, 900).is_empty());
    }

    #[test]
    fn test_performance_metrics() {
        let entries: Vec<HistoryEntry> = (1..=20).map(|i| ok(&format!("q{}", i), i * 500, 1)).collect();
        let metrics = compute_performance_metrics(&entries, 5_000);
        assert_eq!(metrics.fastest_query.unwrap().execution_time_ms, 500);
        assert_eq!(metrics.slowest_query.unwrap().execution_time_ms, 10_000);
        assert_eq!(metrics.average_execution_time_ms, 5_250.0);
        // floor(0.95 * 20) = 19 -> the largest sample
        assert_eq!(metrics.p95_execution_time_ms, 10_000);
        assert_eq!(metrics.slow_query_count, 10);
    }

    #[test]
    fn test_p95_between_median_and_max() {
        for n in 1..60u64 {
            let entries: Vec<HistoryEntry> = (0..n).map(|i| ok("q", (i * 37) % 101, 0)).collect();
            let mut durations: Vec<u64> = entries.iter().map(|e| e.execution_time_ms).collect();
            durations.sort_unstable();
            let median = durations[durations.len() / 2];
            let max = *durations.last().unwrap();

            let p95 = compute_performance_metrics(&entries, 5_000).p95_execution_time_ms;
            assert!(p95 >= median && p95 <= max, "n={} p95={} median={} max={}", n, p95, median, max);
        }
    }

    #[test]
    fn test_p95_index_bounds() {
        assert_eq!(p95_index(0), 0);
        assert_eq!(p95_index(1), 0);
        assert_eq!(p95_index(10), 9);
        assert_eq!(p95_index(100), 95);
    }
}
