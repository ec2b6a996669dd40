// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use serde::{Deserialize, Serialize};

use crate::connection::SearchConnection;

/// Result window: skip `offset`, return up to `limit`, consider at most
/// `max_results` matches server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default)]
    offset: u32,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

fn default_limit() -> u32 {
    50
}

fn default_max_results() -> u32 {
    5000
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
            max_results: default_max_results(),
        }
    }
}

impl Limits {
    #[must_use]
    pub fn new(offset: u32, limit: u32, max_results: u32) -> Self {
        Self { offset, limit, max_results }
    }

    /// Builds limits from untrusted text (query string, form input).
    ///
    /// Anything that is not a non-negative integer becomes `0`.
    #[must_use]
    pub fn from_params(offset: &str, limit: &str, max_results: &str) -> Self {
        Self::new(coerce(offset), coerce(limit), coerce(max_results))
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: u32) -> &mut Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn set_limit(&mut self, limit: u32) -> &mut Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn set_max_results(&mut self, max_results: u32) -> &mut Self {
        self.max_results = max_results;
        self
    }

    pub fn bind<C: SearchConnection + ?Sized>(&self, connection: &mut C) {
        connection.set_limits(self.offset, self.limit, self.max_results);
    }
}

fn coerce(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}
