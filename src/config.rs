// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! searchd server settings.
//!
//! # Example
//!
//! ```
//! use sphinx_search::ServerSettings;
//!
//! // Defaults target a local searchd
//! let settings = ServerSettings::default();
//! assert_eq!(settings.host, "localhost");
//! assert_eq!(settings.port, 9312);
//!
//! let settings = ServerSettings {
//!     host: "search.internal".into(),
//!     max_query_time_ms: 500,
//!     ..Default::default()
//! };
//! assert_eq!(settings.port, 9312);
//! ```

use serde::Deserialize;

/// Where searchd lives and how long a query may run.
///
/// Applied to each new connection by
/// [`SettingsProvider`](crate::connection::SettingsProvider).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// searchd host (default: localhost)
    #[serde(default = "default_host")]
    pub host: String,

    /// searchd binary protocol port (default: 9312)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server side query time limit in milliseconds (default: 5000)
    #[serde(default = "default_max_query_time_ms")]
    pub max_query_time_ms: u32,

    /// Connect timeout in milliseconds (default: 1000)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u32,
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    9312
}
fn default_max_query_time_ms() -> u32 {
    5000
}
fn default_connect_timeout_ms() -> u32 {
    1000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_query_time_ms: default_max_query_time_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
