// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Error type shared by query construction, binding and batch execution.
//!
//! Errors fall into two groups:
//!
//! - **Configuration** errors are raised while a query is being assembled
//!   (bad field names, unknown attributes, mismatched builders, bad values).
//! - **Operational** errors are raised when a batch is executed
//!   (nothing to run, engine failure, connection could not be opened).
//!
//! Adding a filter for an attribute the index does not declare is *not* an
//! error: the filter is dropped. See [`SearchQuery::add_filter`](crate::SearchQuery::add_filter).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Specified fields \"{field}\" are not valid for the index \"{index}\"")]
    InvalidField { field: String, index: String },

    #[error("Attribute \"{attribute}\" is not valid for index \"{index}\"")]
    InvalidAttribute { attribute: String, index: String },

    #[error("Filter \"{attribute}\" is not valid for index \"{index}\"")]
    UnknownFilter { attribute: String, index: String },

    #[error("Index mismatch in builder \"{builder}\" vs query \"{query}\"")]
    IndexMismatch { builder: String, query: String },

    #[error("Filter value must be an integer value, \"{0}\" is not valid")]
    InvalidFilterValue(String),

    #[error("Invalid {kind} value \"{value}\"")]
    InvalidEnumValue { kind: &'static str, value: u32 },

    #[error("No queries have been set to run")]
    NoQueries,

    #[error("Sphinx Error: {0}")]
    Engine(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl SearchError {
    /// True for errors raised while assembling a query, false for errors
    /// raised by executing one.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            SearchError::NoQueries | SearchError::Engine(_) | SearchError::Connection(_)
        )
    }

    /// Wraps an engine error message, upper-casing its first letter.
    pub(crate) fn engine(message: &str) -> Self {
        let mut chars = message.chars();
        let message = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        SearchError::Engine(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_split() {
        assert!(SearchError::InvalidFilterValue("x".into()).is_configuration());
        assert!(SearchError::IndexMismatch { builder: "a".into(), query: "b".into() }.is_configuration());
        assert!(!SearchError::NoQueries.is_configuration());
        assert!(!SearchError::Engine("boom".into()).is_configuration());
    }

    #[test]
    fn test_engine_message_is_capitalised() {
        let err = SearchError::engine("connection to localhost:9312 failed");
        assert_eq!(err.to_string(), "Sphinx Error: Connection to localhost:9312 failed");
        assert_eq!(SearchError::engine("").to_string(), "Sphinx Error: ");
    }

    #[test]
    fn test_invalid_field_names_field_and_index() {
        let err = SearchError::InvalidField { field: "bob".into(), index: "people".into() };
        assert_eq!(
            err.to_string(),
            "Specified fields \"bob\" are not valid for the index \"people\""
        );
    }
}
