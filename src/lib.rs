//! # Sphinx Search
//!
//! Query construction and result mapping for Sphinx searchd clients.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Query Construction                     │
//! │  • SearchIndex declares fields and attributes              │
//! │  • Builder / Criteria / Phrase render extended syntax      │
//! │  • SearchQuery adds filters, grouping, sorting, limits     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                     (bind onto a connection)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SearchManager                        │
//! │  • One connection per batch, opened lazily                 │
//! │  • Tracks queries by connection-assigned id                │
//! │  • Runs the batch in one round trip                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                      (demultiplex by id)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ResultSet / ResultRecord                │
//! │  • Built with the originating index's strategies           │
//! │  • Missing payload keys defaulted                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use sphinx_search::{SearchIndex, SearchManager, SearchQuery};
//! use sphinx_search::connection::from_fn;
//! use sphinx_search::connection::memory::MemoryConnection;
//! use sphinx_search::filter::FilterAttribute;
//! use sphinx_search::result::{RawMatch, RawResult};
//!
//! let index = SearchIndex::new("people")
//!     .fields(["name", "address"])
//!     .attributes(["age", "gender_id"])
//!     .shared();
//!
//! let mut query = SearchQuery::new(&index);
//! query
//!     .create_query_builder()
//!     .in_field(Some("name,address"), None)?
//!     .where_field()
//!     .contains_one_of(["jim alex", "bob"]);
//! query.add_filter(FilterAttribute::new("gender_id", vec![1]));
//!
//! let mut manager = SearchManager::new(from_fn(|| {
//!     Ok(MemoryConnection::new().with_result(1, RawResult {
//!         matches: Some(vec![RawMatch::new(42, 1500).with_attr("age", 31)]),
//!         ..Default::default()
//!     }))
//! }));
//!
//! let results = manager.query(query)?;
//! for record in results.iter() {
//!     println!("{} weighs {}", record.id(), record.weight());
//! }
//! # Ok::<(), sphinx_search::SearchError>(())
//! ```
//!
//! ## Features
//!
//! - **Extended Syntax**: field scoping, any/all/one-of, strict order, proximity, quorum, negation
//! - **Safe Keywords**: reserved characters escaped, quoted phrases kept intact
//! - **Attribute Filters**: value sets, integer and float ranges, silently gated by the index
//! - **Batching**: several queries in one round trip, results matched back by id
//! - **Pluggable Results**: per-index result set and record strategies
//!
//! ## Configuration
//!
//! See [`ServerSettings`] and [`connection::SettingsProvider`].
//!
//! ## Modules
//!
//! - [`search`]: Phrase, Criteria, Field, Builder and SearchIndex
//! - [`query`]: SearchQuery with grouping, sorting, limits and ranking
//! - [`filter`]: Attribute and range filters
//! - [`connection`]: The searchd client seam and an in-memory implementation
//! - [`manager`]: Batch execution
//! - [`result`]: Raw payloads, result sets and records
//! - [`utils`]: Escaping and form-input helpers

pub mod config;
pub mod connection;
pub mod error;
pub mod filter;
pub mod manager;
pub mod query;
pub mod result;
pub mod search;
pub mod utils;

pub mod metrics;

pub use config::ServerSettings;
pub use connection::{ConnectionProvider, SearchConnection};
pub use error::SearchError;
pub use filter::Filter;
pub use manager::SearchManager;
pub use query::SearchQuery;
pub use result::{ResultRecord, ResultSet};
pub use search::{Builder, Criteria, SearchIndex};
