// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Builder - composes several field scoped criteria into one query string.
//!
//! The builder owns its fields; [`FieldMut`] and [`CriteriaMut`] are borrowed
//! handles that remember which field they edit, so `end()` can hand control
//! back to the parent without any back references.
//!
//! # Example
//!
//! ```
//! use sphinx_search::search::{Builder, SearchIndex};
//!
//! let index = SearchIndex::new("people").fields(["name", "address"]).shared();
//! let mut builder = Builder::find(&index);
//!
//! builder
//!     .in_field(Some("name,address"), None)?
//!         .where_field()
//!             .contains_one_of(["jim alex", "bob"])
//!             .contains_strict_order_of(["bob", "alex smith"])
//!         .end()
//!     .end()
//!     .not_in(Some("address"), Some(30))?
//!         .where_field()
//!             .contains(["plymouth"]);
//!
//! assert_eq!(
//!     builder.query(),
//!     "(@(name,address) (\"jim alex\"|bob) bob << \"alex smith\") (@!address[30] plymouth)"
//! );
//! # Ok::<(), sphinx_search::SearchError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use super::criteria::Criteria;
use super::field::Field;
use super::index::SearchIndex;
use crate::error::SearchError;

#[derive(Debug, Clone)]
pub struct Builder {
    index: Arc<SearchIndex>,
    fields: Vec<Field>,
}

impl Builder {
    #[must_use]
    pub fn new(index: Arc<SearchIndex>) -> Self {
        Self { index, fields: Vec::new() }
    }

    /// Starts a builder against `index`.
    #[must_use]
    pub fn find(index: &Arc<SearchIndex>) -> Self {
        Self::new(Arc::clone(index))
    }

    /// Adds an inclusive field scope. `None` matches in all fields.
    ///
    /// Fails if any named field is not declared on the index.
    pub fn in_field(&mut self, field: Option<&str>, within: Option<u32>) -> Result<FieldMut<'_>, SearchError> {
        self.create_field(field, within, false)
    }

    /// Adds an exclusive field scope (`@!field`). `None` matches in all fields.
    pub fn not_in(&mut self, field: Option<&str>, within: Option<u32>) -> Result<FieldMut<'_>, SearchError> {
        self.create_field(field, within, true)
    }

    /// The composed query string.
    #[must_use]
    pub fn query(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn create_field(&mut self, field: Option<&str>, within: Option<u32>, negate: bool) -> Result<FieldMut<'_>, SearchError> {
        if let Some(spec) = field {
            self.index.validate_fields(spec)?;
        }

        self.fields.push(Field::new(field, within, negate));
        let position = self.fields.len() - 1;

        Ok(FieldMut { builder: self, position })
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.fields.iter().map(Field::to_string).collect();
        write!(f, "({})", parts.join(") ("))
    }
}

impl<'a> IntoIterator for &'a Builder {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Handle to a field inside a [`Builder`].
pub struct FieldMut<'b> {
    builder: &'b mut Builder,
    position: usize,
}

impl<'b> FieldMut<'b> {
    /// Starts the criteria for this field, replacing any previous one.
    pub fn where_field(self) -> CriteriaMut<'b> {
        self.builder.fields[self.position].where_field();
        CriteriaMut { builder: self.builder, position: self.position }
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.builder.fields[self.position]
    }

    /// Returns to the owning builder.
    pub fn end(self) -> &'b mut Builder {
        self.builder
    }
}

/// Handle to the criteria of a field inside a [`Builder`].
///
/// Mirrors the [`Criteria`] operators, consuming and returning the handle so
/// calls can be chained and closed with [`end`](CriteriaMut::end).
pub struct CriteriaMut<'b> {
    builder: &'b mut Builder,
    position: usize,
}

impl<'b> CriteriaMut<'b> {
    fn criteria(&mut self) -> &mut Criteria {
        self.builder.fields[self.position].criteria_mut()
    }

    #[must_use]
    pub fn get(&self) -> Option<&Criteria> {
        self.builder.fields[self.position].criteria()
    }

    /// Returns to the owning field.
    pub fn end(self) -> FieldMut<'b> {
        FieldMut { builder: self.builder, position: self.position }
    }

    pub fn clear(mut self) -> Self {
        self.criteria().clear();
        self
    }

    pub fn contains<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().contains(phrases);
        self
    }

    pub fn contains_any_of<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().contains_any_of(phrases);
        self
    }

    pub fn contains_all_of<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().contains_all_of(phrases);
        self
    }

    pub fn contains_one_of<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().contains_one_of(phrases);
        self
    }

    pub fn contains_strict_order_of<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().contains_strict_order_of(phrases);
        self
    }

    pub fn does_not_contain_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().does_not_contain_keywords(keywords);
        self
    }

    pub fn does_not_contain_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().does_not_contain_phrases(phrases);
        self
    }

    pub fn has_phrase_not_containing_phrase<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.criteria().has_phrase_not_containing_phrase(phrases);
        self
    }

    pub fn contains_keywords_in_quorum(mut self, keywords: &str, threshold: u32) -> Self {
        self.criteria().contains_keywords_in_quorum(keywords, threshold);
        self
    }

    pub fn contains_keywords_in_proximity(mut self, keywords: &str, proximity: u32) -> Self {
        self.criteria().contains_keywords_in_proximity(keywords, proximity);
        self
    }

    pub fn starts_with(mut self, phrase: &str) -> Self {
        self.criteria().starts_with(phrase);
        self
    }

    pub fn ends_with(mut self, phrase: &str) -> Self {
        self.criteria().ends_with(phrase);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Arc<SearchIndex> {
        SearchIndex::new("index").fields(["field1", "field2"]).shared()
    }

    #[test]
    fn test_find_empty_builder() {
        let builder = Builder::find(&SearchIndex::new("index").shared());
        assert!(builder.is_empty());
        assert_eq!(builder.query(), "()");
    }

    #[test]
    fn test_in_field() {
        let mut builder = Builder::find(&index());
        let field = builder.in_field(Some("field1"), None).unwrap();
        assert_eq!(field.field().field(), Some("field1"));
        assert!(!field.field().is_not());
    }

    #[test]
    fn test_in_all_fields() {
        let mut builder = Builder::find(&index());
        assert!(builder.in_field(None, None).is_ok());
        assert!(builder.not_in(None, Some(5)).is_ok());
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_invalid_field_is_rejected() {
        let mut builder = Builder::find(&index());
        let err = builder.in_field(Some("bob"), None).err().unwrap();
        assert_eq!(
            err,
            SearchError::InvalidField { field: "bob".into(), index: "index".into() }
        );
        assert!(builder.not_in(Some("field1,bob"), None).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_not_in() {
        let mut builder = Builder::find(&index());
        assert!(builder.not_in(Some("field1"), None).unwrap().field().is_not());
    }

    #[test]
    fn test_fields_are_kept_in_order() {
        let mut builder = Builder::find(&index());
        builder.in_field(Some("field1"), None).unwrap();
        builder.in_field(Some("field2"), None).unwrap();

        let names: Vec<_> = builder.iter().filter_map(Field::field).collect();
        assert_eq!(names, vec!["field1", "field2"]);
        assert_eq!(builder.query(), "(@(field1) ) (@(field2) )");
    }

    #[test]
    fn test_full_chain() -> Result<(), SearchError> {
        let index = SearchIndex::new("bob").fields(["name", "address"]).shared();
        let mut builder = Builder::find(&index);

        builder
            .in_field(Some("name,address"), None)?
            .where_field()
            .contains_one_of(["jim alex", "bob"])
            .contains_strict_order_of(["bob", "alex smith"])
            .end()
            .end()
            .not_in(Some("address"), Some(30))?
            .where_field()
            .contains(["plymouth"]);

        let expected = "(@(name,address) (\"jim alex\"|bob) bob << \"alex smith\") (@!address[30] plymouth)";
        assert_eq!(builder.to_string(), expected);
        assert_eq!(builder.query(), expected);
        Ok(())
    }

    #[test]
    fn test_criteria_handle_exposes_criteria() {
        let mut builder = Builder::find(&index());
        let criteria = builder
            .in_field(Some("field1"), None)
            .unwrap()
            .where_field()
            .contains(["a"])
            .contains(["b"]);
        assert_eq!(criteria.get().map(Criteria::len), Some(2));
        let criteria = criteria.clear();
        assert!(criteria.get().is_some_and(Criteria::is_empty));
    }
}
