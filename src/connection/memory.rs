// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! In-memory connection for tests and demos.
//!
//! Records every call, hands out ids from 1, and answers `run_queries` from
//! scripted payloads (missing ones come back empty) or a scripted failure.

use std::collections::BTreeMap;

use tracing::debug;

use super::SearchConnection;
use crate::query::{GroupFunction, RankingMode, SortMode};
use crate::result::RawResult;

/// One call made against a [`MemoryConnection`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionCall {
    SetServer { host: String, port: u16 },
    SetConnectTimeout(u32),
    SetMaxQueryTime(u32),
    ResetFilters,
    ResetGroupBy,
    SetRankingMode(RankingMode),
    SetSortMode { mode: SortMode, sort_by: String },
    SetLimits { offset: u32, limit: u32, max_results: u32 },
    SetGroupBy { attribute: String, function: GroupFunction, group_sort: String },
    SetFilter { attribute: String, values: Vec<i64>, exclude: bool },
    SetFilterRange { attribute: String, min: i64, max: i64, exclude: bool },
    SetFilterFloatRange { attribute: String, min: f64, max: f64, exclude: bool },
    AddQuery { query: String, index: String },
    RunQueries,
}

#[derive(Debug, Clone)]
pub struct MemoryConnection {
    calls: Vec<ConnectionCall>,
    next_id: u32,
    pending: Vec<u32>,
    responses: BTreeMap<u32, RawResult>,
    failure: Option<String>,
    last_error: String,
}

impl MemoryConnection {
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_id: 1,
            pending: Vec::new(),
            responses: BTreeMap::new(),
            failure: None,
            last_error: String::new(),
        }
    }

    /// Script the payload returned for query `id`.
    #[must_use]
    pub fn with_result(mut self, id: u32, result: RawResult) -> Self {
        self.responses.insert(id, result);
        self
    }

    /// Make `run_queries` fail with `message`.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[ConnectionCall] {
        &self.calls
    }

    /// Queries registered since the last run
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchConnection for MemoryConnection {
    fn set_server(&mut self, host: &str, port: u16) {
        self.calls.push(ConnectionCall::SetServer { host: host.to_string(), port });
    }

    fn set_connect_timeout(&mut self, millis: u32) {
        self.calls.push(ConnectionCall::SetConnectTimeout(millis));
    }

    fn set_max_query_time(&mut self, millis: u32) {
        self.calls.push(ConnectionCall::SetMaxQueryTime(millis));
    }

    fn reset_filters(&mut self) {
        self.calls.push(ConnectionCall::ResetFilters);
    }

    fn reset_group_by(&mut self) {
        self.calls.push(ConnectionCall::ResetGroupBy);
    }

    fn set_ranking_mode(&mut self, mode: RankingMode) {
        self.calls.push(ConnectionCall::SetRankingMode(mode));
    }

    fn set_sort_mode(&mut self, mode: SortMode, sort_by: &str) {
        self.calls.push(ConnectionCall::SetSortMode { mode, sort_by: sort_by.to_string() });
    }

    fn set_limits(&mut self, offset: u32, limit: u32, max_results: u32) {
        self.calls.push(ConnectionCall::SetLimits { offset, limit, max_results });
    }

    fn set_group_by(&mut self, attribute: &str, function: GroupFunction, group_sort: &str) {
        self.calls.push(ConnectionCall::SetGroupBy {
            attribute: attribute.to_string(),
            function,
            group_sort: group_sort.to_string(),
        });
    }

    fn set_filter(&mut self, attribute: &str, values: &[i64], exclude: bool) {
        self.calls.push(ConnectionCall::SetFilter {
            attribute: attribute.to_string(),
            values: values.to_vec(),
            exclude,
        });
    }

    fn set_filter_range(&mut self, attribute: &str, min: i64, max: i64, exclude: bool) {
        self.calls.push(ConnectionCall::SetFilterRange { attribute: attribute.to_string(), min, max, exclude });
    }

    fn set_filter_float_range(&mut self, attribute: &str, min: f64, max: f64, exclude: bool) {
        self.calls.push(ConnectionCall::SetFilterFloatRange { attribute: attribute.to_string(), min, max, exclude });
    }

    fn add_query(&mut self, query: &str, index: &str) -> u32 {
        self.calls.push(ConnectionCall::AddQuery { query: query.to_string(), index: index.to_string() });

        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(id);
        id
    }

    fn run_queries(&mut self) -> Option<BTreeMap<u32, RawResult>> {
        self.calls.push(ConnectionCall::RunQueries);

        if let Some(message) = &self.failure {
            self.last_error = message.clone();
            return None;
        }
        if self.pending.is_empty() {
            self.last_error = "no queries defined, issue add_query() first".to_string();
            return None;
        }

        let mut results = std::mem::take(&mut self.responses);
        for id in self.pending.drain(..) {
            results.entry(id).or_default();
        }
        debug!(count = results.len(), "Memory connection answered batch");

        Some(results)
    }

    fn last_error(&self) -> String {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_connection_is_empty() {
        let conn = MemoryConnection::new();
        assert!(conn.is_empty());
        assert!(conn.calls().is_empty());
        assert_eq!(conn.last_error(), "");
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut conn = MemoryConnection::new();
        assert_eq!(conn.add_query("a", "idx"), 1);
        assert_eq!(conn.add_query("b", "idx"), 2);
        assert_eq!(conn.len(), 2);
    }

    #[test]
    fn test_run_returns_scripted_and_default_payloads() {
        let scripted = RawResult { total_found: Some(3), ..Default::default() };
        let mut conn = MemoryConnection::new().with_result(2, scripted.clone());
        conn.add_query("a", "idx");
        conn.add_query("b", "idx");

        let results = conn.run_queries().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[&1], RawResult::default());
        assert_eq!(results[&2], scripted);
        assert!(conn.is_empty());
    }

    #[test]
    fn test_run_without_queries_fails() {
        let mut conn = MemoryConnection::new();
        assert!(conn.run_queries().is_none());
        assert!(conn.last_error().starts_with("no queries"));
    }

    #[test]
    fn test_scripted_failure() {
        let mut conn = MemoryConnection::new().with_error("connection refused");
        conn.add_query("a", "idx");
        assert!(conn.run_queries().is_none());
        assert_eq!(conn.last_error(), "connection refused");
        assert_eq!(conn.calls().last(), Some(&ConnectionCall::RunQueries));
    }
}
