// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Engine connection seam.
//!
//! [`SearchConnection`] models a searchd client session: per-query state is
//! set, the query is registered with [`add_query`](SearchConnection::add_query)
//! (which returns its correlation id), and the whole batch runs in one round
//! trip with [`run_queries`](SearchConnection::run_queries).
//!
//! ```text
//! reset_filters / reset_group_by
//! set_ranking_mode, set_group_by, set_sort_mode, set_limits, set_filter*
//! add_query(query, index)  → id 1
//! ... repeat per query ...
//! run_queries()            → { 1: RawResult, 2: RawResult, ... }
//! ```
//!
//! Ids are scoped to one session, so [`SearchManager`](crate::SearchManager)
//! asks a [`ConnectionProvider`] for a fresh connection per batch.

pub mod memory;

use std::collections::BTreeMap;

use crate::config::ServerSettings;
use crate::error::SearchError;
use crate::query::{GroupFunction, RankingMode, SortMode};
use crate::result::RawResult;

/// A searchd client session. Adapters translate the enums to wire codes
/// with their `code()` methods.
pub trait SearchConnection {
    fn set_server(&mut self, host: &str, port: u16);

    fn set_connect_timeout(&mut self, millis: u32);

    fn set_max_query_time(&mut self, millis: u32);

    fn reset_filters(&mut self);

    fn reset_group_by(&mut self);

    fn set_ranking_mode(&mut self, mode: RankingMode);

    fn set_sort_mode(&mut self, mode: SortMode, sort_by: &str);

    fn set_limits(&mut self, offset: u32, limit: u32, max_results: u32);

    fn set_group_by(&mut self, attribute: &str, function: GroupFunction, group_sort: &str);

    fn set_filter(&mut self, attribute: &str, values: &[i64], exclude: bool);

    fn set_filter_range(&mut self, attribute: &str, min: i64, max: i64, exclude: bool);

    fn set_filter_float_range(&mut self, attribute: &str, min: f64, max: f64, exclude: bool);

    /// Registers a query with the current settings and returns its id.
    fn add_query(&mut self, query: &str, index: &str) -> u32;

    /// Runs every registered query. `None` means the batch failed; see
    /// [`last_error`](SearchConnection::last_error).
    fn run_queries(&mut self) -> Option<BTreeMap<u32, RawResult>>;

    fn last_error(&self) -> String;
}

/// Hands out connections, one per batch.
pub trait ConnectionProvider {
    type Connection: SearchConnection;

    fn connect(&self) -> Result<Self::Connection, SearchError>;
}

/// Provider backed by a plain function or closure.
#[derive(Debug, Clone)]
pub struct FnProvider<F> {
    factory: F,
}

/// Wraps a connection factory as a [`ConnectionProvider`].
pub fn from_fn<F, C>(factory: F) -> FnProvider<F>
where
    F: Fn() -> Result<C, SearchError>,
    C: SearchConnection,
{
    FnProvider { factory }
}

impl<F, C> ConnectionProvider for FnProvider<F>
where
    F: Fn() -> Result<C, SearchError>,
    C: SearchConnection,
{
    type Connection = C;

    fn connect(&self) -> Result<C, SearchError> {
        (self.factory)()
    }
}

/// Provider that points every new connection at the configured server.
#[derive(Debug, Clone)]
pub struct SettingsProvider<F> {
    settings: ServerSettings,
    factory: F,
}

impl<F, C> SettingsProvider<F>
where
    F: Fn() -> Result<C, SearchError>,
    C: SearchConnection,
{
    pub fn new(settings: ServerSettings, factory: F) -> Self {
        Self { settings, factory }
    }

    #[must_use]
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }
}

impl<F, C> ConnectionProvider for SettingsProvider<F>
where
    F: Fn() -> Result<C, SearchError>,
    C: SearchConnection,
{
    type Connection = C;

    fn connect(&self) -> Result<C, SearchError> {
        let mut connection = (self.factory)()?;
        connection.set_server(&self.settings.host, self.settings.port);
        connection.set_connect_timeout(self.settings.connect_timeout_ms);
        connection.set_max_query_time(self.settings.max_query_time_ms);
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{ConnectionCall, MemoryConnection};
    use super::*;

    #[test]
    fn test_fn_provider() {
        let provider = from_fn(|| Ok(MemoryConnection::new()));
        let conn = provider.connect().unwrap();
        assert!(conn.calls().is_empty());

        let failing = from_fn(|| Err::<MemoryConnection, _>(SearchError::Connection("refused".into())));
        assert_eq!(
            failing.connect().err(),
            Some(SearchError::Connection("refused".into()))
        );
    }

    #[test]
    fn test_settings_provider_configures_connection() {
        let settings = ServerSettings {
            host: "search.internal".into(),
            port: 9306,
            max_query_time_ms: 250,
            connect_timeout_ms: 1,
        };
        let provider = SettingsProvider::new(settings, || Ok(MemoryConnection::new()));
        assert_eq!(provider.settings().port, 9306);

        let conn = provider.connect().unwrap();
        assert_eq!(
            conn.calls(),
            &[
                ConnectionCall::SetServer { host: "search.internal".into(), port: 9306 },
                ConnectionCall::SetConnectTimeout(1),
                ConnectionCall::SetMaxQueryTime(250),
            ]
        );
    }
}
