// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search index definition.
//!
//! Declares the full-text fields and filterable attributes of one searchd
//! index, whether it was built with wildcard (infix/prefix) support, and
//! how raw engine results are mapped for it.
//!
//! ```text
//! SearchIndex::new("people")
//!     .fields(["name", "address"])      → @name / @(name,address) scopes
//!     .attributes(["age", "gender"])    → filters, sorts, group-bys
//!     .with_wildcard_support(true)      → "bob smith" → "*bob* *smith*"
//! ```
//!
//! Definitions are immutable once shared; queries and builders hold the
//! same `Arc<SearchIndex>` and compare by identity.

use std::sync::Arc;

use crate::error::SearchError;
use crate::result::{DocumentId, RawMatch, RawResult, ResultRecord, ResultSet};
use crate::query::SearchQuery;

/// Builds the [`ResultSet`] for a query from its raw engine payload.
pub type ResultSetFactory = fn(SearchQuery, RawResult) -> ResultSet;

/// Builds a [`ResultRecord`] from one raw match.
pub type RecordFactory = fn(DocumentId, &RawMatch) -> ResultRecord;

#[derive(Debug, Clone)]
pub struct SearchIndex {
    name: String,
    fields: Vec<String>,
    attributes: Vec<String>,
    supports_wildcard: bool,
    use_wildcard_keywords: bool,
    result_set: ResultSetFactory,
    result_record: RecordFactory,
}

impl SearchIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            attributes: Vec::new(),
            supports_wildcard: false,
            use_wildcard_keywords: true,
            result_set: ResultSet::new,
            result_record: ResultRecord::from_match,
        }
    }

    /// Declare a full-text field
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Declare several full-text fields
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a filterable attribute
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// Declare several filterable attributes
    pub fn attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Mark the index as built with infix/prefix (wildcard) support
    pub fn with_wildcard_support(mut self, supported: bool) -> Self {
        self.supports_wildcard = supported;
        self
    }

    /// Whether keywords should be wrapped in wildcards when supported (default on)
    pub fn with_wildcard_keywords(mut self, enabled: bool) -> Self {
        self.use_wildcard_keywords = enabled;
        self
    }

    /// Use a custom result set strategy
    pub fn with_result_set(mut self, factory: ResultSetFactory) -> Self {
        self.result_set = factory;
        self
    }

    /// Use a custom record strategy
    pub fn with_result_record(mut self, factory: RecordFactory) -> Self {
        self.result_record = factory;
        self
    }

    /// Freeze the definition for sharing between queries and builders
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn available_fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn available_attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub fn supports_wildcard(&self) -> bool {
        self.supports_wildcard
    }

    #[must_use]
    pub fn use_wildcard_keywords(&self) -> bool {
        self.use_wildcard_keywords
    }

    #[must_use]
    pub fn result_set_factory(&self) -> ResultSetFactory {
        self.result_set
    }

    #[must_use]
    pub fn record_factory(&self) -> RecordFactory {
        self.result_record
    }

    #[must_use]
    pub fn is_valid_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    #[must_use]
    pub fn is_valid_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }

    /// Check every name in a comma separated field list.
    pub fn validate_fields(&self, spec: &str) -> Result<(), SearchError> {
        if spec.split(',').map(str::trim).all(|f| self.is_valid_field(f)) {
            Ok(())
        } else {
            Err(SearchError::InvalidField {
                field: spec.to_string(),
                index: self.name.clone(),
            })
        }
    }

    /// Scope `keywords` to a comma separated field list.
    ///
    /// One field gives `@name keywords`, several give `@(a,b) keywords`.
    /// Whitespace in the list is ignored.
    pub fn create_field_query_string(&self, fields: &str, keywords: &str) -> Result<String, SearchError> {
        let fields: String = fields.chars().filter(|c| !c.is_whitespace()).collect();
        self.validate_fields(&fields)?;

        if fields.contains(',') {
            Ok(format!("@({fields}) {keywords}"))
        } else {
            Ok(format!("@{fields} {keywords}"))
        }
    }

    /// Wrap each space separated keyword in `*`.
    ///
    /// Single spaces separate keywords; runs of spaces produce bare `**`
    /// tokens that the engine ignores.
    #[must_use]
    pub fn convert_keywords_to_wildcard(&self, keywords: &str) -> String {
        format!("*{}*", keywords.replace(' ', "* *"))
    }

    /// Wildcard form of `keywords` when the index supports and wants it,
    /// `keywords` unchanged otherwise.
    #[must_use]
    pub fn create_wildcard_query_string(&self, keywords: &str) -> String {
        if self.supports_wildcard && self.use_wildcard_keywords {
            self.convert_keywords_to_wildcard(keywords)
        } else {
            keywords.to_string()
        }
    }
}
