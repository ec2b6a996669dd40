// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field - scopes a [`Criteria`] to one field, several fields, or all fields.
//!
//! ```text
//! None                → criteria                 (all fields)
//! "name", within 30   → @name[30] criteria       (first 30 words only)
//! "name"              → @(name) criteria
//! "name,address"      → @(name,address) criteria (window ignored)
//! negated             → @!(name) criteria
//! ```

use std::fmt;

use super::criteria::Criteria;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    field: Option<String>,
    within: Option<u32>,
    negate: bool,
    multi_field: bool,
    criteria: Option<Criteria>,
}

impl Field {
    /// Creates a field scope. `field` may be a comma separated list; `None`
    /// searches every field.
    #[must_use]
    pub fn new(field: Option<&str>, within: Option<u32>, negate: bool) -> Self {
        Self {
            multi_field: field.is_some_and(|f| f.contains(',')),
            field: field.map(str::to_string),
            within,
            negate,
            criteria: None,
        }
    }

    /// Starts a fresh criteria for this field, replacing any previous one.
    pub fn where_field(&mut self) -> &mut Criteria {
        self.criteria.insert(Criteria::new())
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    #[must_use]
    pub fn within(&self) -> Option<u32> {
        self.within
    }

    #[must_use]
    pub fn is_not(&self) -> bool {
        self.negate
    }

    #[must_use]
    pub fn is_multi_field(&self) -> bool {
        self.multi_field
    }

    #[must_use]
    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    pub(crate) fn criteria_mut(&mut self) -> &mut Criteria {
        self.criteria.get_or_insert_with(Criteria::new)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let criteria = self.criteria.as_ref().map(Criteria::to_string).unwrap_or_default();

        let Some(field) = &self.field else {
            return f.write_str(&criteria);
        };

        let not = if self.negate { "!" } else { "" };
        match self.within {
            Some(within) if !self.multi_field => write!(f, "@{not}{field}[{within}] {criteria}"),
            _ => write!(f, "@{not}({field}) {criteria}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let field = Field::new(Some("field1"), Some(23), true);
        assert_eq!(field.field(), Some("field1"));
        assert_eq!(field.within(), Some(23));
        assert!(field.is_not());
        assert!(!field.is_multi_field());
        assert!(field.criteria().is_none());

        assert!(Field::new(Some("field1,field2"), Some(23), true).is_multi_field());
    }

    #[test]
    fn test_render_single_field() {
        assert_eq!(Field::new(Some("field1"), None, false).to_string(), "@(field1) ");
    }

    #[test]
    fn test_render_all_fields() {
        assert_eq!(Field::new(None, Some(10), true).to_string(), "");

        let mut field = Field::new(None, None, false);
        field.where_field().contains(["bob"]);
        assert_eq!(field.to_string(), "bob");
    }

    #[test]
    fn test_render_multi_field_ignores_window() {
        assert_eq!(Field::new(Some("field1,field2"), None, false).to_string(), "@(field1,field2) ");
        assert_eq!(Field::new(Some("field1,field2"), Some(23), false).to_string(), "@(field1,field2) ");
    }

    #[test]
    fn test_render_window() {
        assert_eq!(Field::new(Some("field1"), Some(23), false).to_string(), "@field1[23] ");
        assert_eq!(Field::new(Some("field1"), Some(23), true).to_string(), "@!field1[23] ");
        assert_eq!(Field::new(Some("field1"), None, true).to_string(), "@!(field1) ");
    }

    #[test]
    fn test_where_field_replaces_criteria() {
        let mut field = Field::new(Some("name"), None, false);
        field.where_field().contains(["bob"]);
        field.where_field().contains(["alex"]);
        assert_eq!(field.to_string(), "@(name) alex");
    }
}
