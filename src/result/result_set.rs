// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::collections::BTreeMap;

use serde_json::Value;

use super::raw::{DocumentId, RawMatch, RawResult, WordStats};
use super::record::ResultRecord;
use crate::filter::Filter;
use crate::query::SearchQuery;

static NO_WORDS: BTreeMap<String, WordStats> = BTreeMap::new();

/// The results of one query in a batch.
///
/// Holds the query that produced it and the raw payload; records are built
/// on iteration with the index's record strategy.
#[derive(Debug, Clone)]
pub struct ResultSet {
    query: SearchQuery,
    result: RawResult,
}

impl ResultSet {
    /// Default result set strategy for [`SearchIndex`](crate::search::SearchIndex).
    pub fn new(query: SearchQuery, result: RawResult) -> Self {
        Self { query, result }
    }

    #[must_use]
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    #[must_use]
    pub fn raw(&self) -> &RawResult {
        &self.result
    }

    /// True when the payload carries a `matches` key, even if it is empty.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.result.matches.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches().is_empty()
    }

    /// Execution time in milliseconds.
    #[must_use]
    pub fn execution_time(&self) -> u64 {
        self.result.time.unwrap_or(0)
    }

    /// Total matches in the index, ignoring limits.
    #[must_use]
    pub fn total_results(&self) -> u64 {
        self.result.total_found.unwrap_or(0)
    }

    #[must_use]
    pub fn document_ids(&self) -> Vec<DocumentId> {
        self.matches().iter().map(|m| m.id).collect()
    }

    #[must_use]
    pub fn active_filters(&self) -> &[Filter] {
        self.query.filters()
    }

    #[must_use]
    pub fn match_statistics(&self) -> &BTreeMap<String, WordStats> {
        self.result.words.as_ref().unwrap_or(&NO_WORDS)
    }

    /// Records in payload order.
    pub fn iter(&self) -> impl Iterator<Item = ResultRecord> + '_ {
        let factory = self.query.index().record_factory();
        self.matches().iter().map(move |m| factory(m.id, m))
    }

    /// `(document id, value)` for every match carrying `attribute`, in payload order.
    #[must_use]
    pub fn attribute_from_documents(&self, attribute: &str) -> Vec<(DocumentId, &Value)> {
        self.matches()
            .iter()
            .filter_map(|m| m.attrs.get(attribute).map(|v| (m.id, v)))
            .collect()
    }

    /// Distinct values of `attribute` across all matches. Array values
    /// (multi-value attributes) contribute each element.
    #[must_use]
    pub fn flattened_attribute(&self, attribute: &str) -> Vec<Value> {
        let mut values: Vec<Value> = Vec::new();
        for value in self.matches().iter().filter_map(|m| m.attrs.get(attribute)) {
            let items = match value {
                Value::Array(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            for item in items {
                if !values.contains(item) {
                    values.push(item.clone());
                }
            }
        }
        values
    }

    fn matches(&self) -> &[RawMatch] {
        self.result.matches.as_deref().unwrap_or(&[])
    }
}
