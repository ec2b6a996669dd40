// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::connection::SearchConnection;
use crate::error::SearchError;

/// Matches documents whose attribute holds any of a set of integers.
///
/// With `exclude` set, matching documents are removed instead. A common use
/// is excluding documents returned by an earlier search via an id attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAttribute {
    name: String,
    values: Vec<i64>,
    #[serde(default)]
    exclude: bool,
}

impl FilterAttribute {
    pub fn new(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self { name: name.into(), values, exclude: false }
    }

    /// Builds the filter from untyped values, accepting only true integers.
    ///
    /// Numeric strings and floats are rejected.
    pub fn try_from_json(name: impl Into<String>, values: &[Value]) -> Result<Self, SearchError> {
        let values = values.iter().map(integer_value).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, values))
    }

    #[must_use]
    pub fn excluding(mut self, exclude: bool) -> Self {
        self.exclude = exclude;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<i64>) -> &mut Self {
        self.values = values;
        self
    }

    /// Replaces the values from untyped input; on error the old values are kept.
    pub fn set_json_values(&mut self, values: &[Value]) -> Result<&mut Self, SearchError> {
        self.values = values.iter().map(integer_value).collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    pub fn add_value(&mut self, value: i64) -> &mut Self {
        self.values.push(value);
        self
    }

    #[must_use]
    pub fn exclude(&self) -> bool {
        self.exclude
    }

    pub fn set_exclude(&mut self, exclude: bool) -> &mut Self {
        self.exclude = exclude;
        self
    }

    pub fn bind<C: SearchConnection + ?Sized>(&self, connection: &mut C) {
        connection.set_filter(&self.name, &self.values, self.exclude);
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.exclude { "excludes" } else { "includes" };
        let values: Vec<String> = self.values.iter().map(i64::to_string).collect();
        write!(f, "\"{}\" {} \"{}\"", self.name, kind, values.join(", "))
    }
}

fn integer_value(value: &Value) -> Result<i64, SearchError> {
    value
        .as_i64()
        .ok_or_else(|| SearchError::InvalidFilterValue(value.to_string()))
}
