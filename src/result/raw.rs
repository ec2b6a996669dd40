// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Raw per-query payloads as returned by a [`SearchConnection`](crate::connection::SearchConnection).
//!
//! ```json
//! {
//!   "matches": [ { "id": 12, "weight": 1500, "attrs": { "age": 34 } } ],
//!   "time": 3,
//!   "total_found": 1,
//!   "words": { "bob": { "docs": 1, "hits": 2 } }
//! }
//! ```
//!
//! Engines omit `matches`, `time` and `total_found` for some empty results,
//! so every key is optional.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type DocumentId = u64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Matches in engine order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<RawMatch>>,

    /// Execution time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,

    /// Matches found in the index, ignoring limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_found: Option<u64>,

    /// Per keyword statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<BTreeMap<String, WordStats>>,
}

impl RawResult {
    /// Fill in the keys engines may leave out.
    pub(crate) fn with_defaults(mut self) -> Self {
        self.matches.get_or_insert_with(Vec::new);
        self.time.get_or_insert(0);
        self.total_found.get_or_insert(0);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub id: DocumentId,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub attrs: BTreeMap<String, Value>,
}

impl RawMatch {
    pub fn new(id: DocumentId, weight: i64) -> Self {
        Self { id, weight, attrs: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub docs: u64,
    pub hits: u64,
}
