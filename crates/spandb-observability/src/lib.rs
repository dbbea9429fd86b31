//! Query counters and observability infrastructure for the storage layer.
//!
//! # Design Principles
//!
//! - **Best-effort:** counters are diagnostic only and never influence query
//!   results or error paths.
//! - **Non-blocking:** recording is a single relaxed atomic increment; there
//!   is nothing to lock and nothing that can fail.
//! - **Resettable:** tests and diagnostic tooling can zero the counters and
//!   take point-in-time snapshots.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

static SPANDB_SEARCHES_TOTAL: AtomicU64 = AtomicU64::new(0);
static SPANDB_INDEX_SEARCHES_TOTAL: AtomicU64 = AtomicU64::new(0);
static SPANDB_SEARCH_SHORT_CIRCUITS_TOTAL: AtomicU64 = AtomicU64::new(0);
static SPANDB_STABLE_SORTS_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Point-in-time snapshot of query counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryMetricsSnapshot {
    pub searches_total: u64,
    pub index_searches_total: u64,
    pub search_short_circuits_total: u64,
    pub stable_sorts_total: u64,
}

/// Record a dense range search against a column.
pub fn record_search() {
    SPANDB_SEARCHES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

/// Record a search over an externally supplied index list.
pub fn record_index_search() {
    SPANDB_INDEX_SEARCHES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

/// Record a search answered by constraint validation alone, without
/// touching column data.
pub fn record_search_short_circuit() {
    SPANDB_SEARCH_SHORT_CIRCUITS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

/// Record a stable sort of an external row-index array.
pub fn record_stable_sort() {
    SPANDB_STABLE_SORTS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

/// Read a point-in-time snapshot of all query counters.
#[must_use]
pub fn query_metrics_snapshot() -> QueryMetricsSnapshot {
    QueryMetricsSnapshot {
        searches_total: SPANDB_SEARCHES_TOTAL.load(Ordering::Relaxed),
        index_searches_total: SPANDB_INDEX_SEARCHES_TOTAL.load(Ordering::Relaxed),
        search_short_circuits_total: SPANDB_SEARCH_SHORT_CIRCUITS_TOTAL.load(Ordering::Relaxed),
        stable_sorts_total: SPANDB_STABLE_SORTS_TOTAL.load(Ordering::Relaxed),
    }
}

/// Reset all query counters to zero (tests/diagnostics).
pub fn reset_query_metrics() {
    SPANDB_SEARCHES_TOTAL.store(0, Ordering::Relaxed);
    SPANDB_INDEX_SEARCHES_TOTAL.store(0, Ordering::Relaxed);
    SPANDB_SEARCH_SHORT_CIRCUITS_TOTAL.store(0, Ordering::Relaxed);
    SPANDB_STABLE_SORTS_TOTAL.store(0, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_reset() {
        reset_query_metrics();
        record_search();
        record_search();
        record_index_search();
        record_search_short_circuit();
        record_stable_sort();

        let snap = query_metrics_snapshot();
        assert_eq!(snap.searches_total, 2);
        assert_eq!(snap.index_searches_total, 1);
        assert_eq!(snap.search_short_circuits_total, 1);
        assert_eq!(snap.stable_sorts_total, 1);

        reset_query_metrics();
        let snap = query_metrics_snapshot();
        assert_eq!(snap.searches_total, 0);
        assert_eq!(snap.stable_sorts_total, 0);
    }
}
