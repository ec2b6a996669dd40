// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Batch execution.
//!
//! ```text
//! add_query(q1) ──┐  connect (lazily), bind → id 1
//! add_query(q2) ──┤  bind → id 2
//! search() ───────┘  run_queries → { 1: raw, 2: raw }
//!                     → { 1: ResultSet(q1), 2: ResultSet(q2) }
//!                     connection dropped, batch cleared
//! ```
//!
//! Correlation ids only mean something within one connection session, so a
//! new connection is opened for every batch.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::connection::{ConnectionProvider, SearchConnection};
use crate::error::SearchError;
use crate::metrics;
use crate::query::SearchQuery;
use crate::result::ResultSet;

pub struct SearchManager<P: ConnectionProvider> {
    provider: P,
    connection: Option<P::Connection>,
    queries: BTreeMap<u32, SearchQuery>,
}

impl<P: ConnectionProvider + fmt::Debug> fmt::Debug for SearchManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchManager")
            .field("provider", &self.provider)
            .field("connected", &self.connection.is_some())
            .field("queries", &self.queries)
            .finish()
    }
}

impl<P: ConnectionProvider> SearchManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            connection: None,
            queries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The connection for the pending batch, if one is open.
    #[must_use]
    pub fn connection(&self) -> Option<&P::Connection> {
        self.connection.as_ref()
    }

    /// Binds `query` onto the batch connection and returns its id.
    pub fn add_query(&mut self, mut query: SearchQuery) -> Result<u32, SearchError> {
        let connection = match &mut self.connection {
            Some(connection) => connection,
            slot @ None => slot.insert(open_connection(&self.provider)?),
        };

        let id = query.bind(connection);
        self.queries.insert(id, query);
        Ok(id)
    }

    /// Runs the pending batch and maps each payload to a [`ResultSet`].
    ///
    /// On success the batch is consumed and the connection closed. On
    /// failure the batch is discarded as well.
    pub fn search(&mut self) -> Result<BTreeMap<u32, ResultSet>, SearchError> {
        let Some(connection) = self.connection.as_mut().filter(|_| !self.queries.is_empty()) else {
            metrics::record_search_error("no_queries");
            return Err(SearchError::NoQueries);
        };

        let count = self.queries.len();
        let start = Instant::now();
        let raw = connection.run_queries();
        metrics::record_search_latency(start.elapsed());

        let Some(raw) = raw else {
            let message = connection.last_error();
            warn!(queries = count, error = %message, "Search batch failed");
            metrics::record_search_batch(count, "error");
            metrics::record_search_error("engine");
            self.reset();
            return Err(SearchError::engine(&message));
        };

        let mut queries = std::mem::take(&mut self.queries);
        self.connection = None;

        let mut results = BTreeMap::new();
        for (id, payload) in raw {
            let Some(query) = queries.remove(&id) else {
                debug!(id, "Ignoring result for untracked query");
                continue;
            };
            let factory = query.index().result_set_factory();
            results.insert(id, factory(query, payload.with_defaults()));
        }

        info!(queries = count, results = results.len(), "Search batch complete");
        metrics::record_search_batch(count, "success");
        Ok(results)
    }

    /// Runs `query` on its own and returns its results.
    ///
    /// Anything already pending runs in the same batch; those results are
    /// discarded.
    pub fn query(&mut self, query: SearchQuery) -> Result<ResultSet, SearchError> {
        let id = self.add_query(query)?;
        let mut results = self.search()?;
        // every tracked id gets a result unless the engine left it out
        results.remove(&id).ok_or_else(|| SearchError::engine("no result returned for query"))
    }

    /// Drops the pending batch and its connection.
    pub fn reset(&mut self) {
        self.queries.clear();
        self.connection = None;
    }

    #[must_use]
    pub fn get_query(&self, id: u32) -> Option<&SearchQuery> {
        self.queries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &SearchQuery)> {
        self.queries.iter().map(|(id, query)| (*id, query))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

fn open_connection<P: ConnectionProvider>(provider: &P) -> Result<P::Connection, SearchError> {
    match provider.connect() {
        Ok(connection) => {
            metrics::record_connection("success");
            debug!("Opened search connection");
            Ok(connection)
        }
        Err(e) => {
            warn!(error = %e, "Failed to open search connection");
            metrics::record_connection("error");
            metrics::record_search_error("connection");
            Err(e)
        }
    }
}
