// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::connection::SearchConnection;

/// Matches documents whose integer attribute lies within `min..=max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRange {
    name: String,
    min: i64,
    max: i64,
    #[serde(default)]
    exclude: bool,
}

impl FilterRange {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self { name: name.into(), min, max, exclude: false }
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
    pub fn min(&self) -> i64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn set_min(&mut self, min: i64) -> &mut Self {
        self.min = min;
        self
    }

    pub fn set_max(&mut self, max: i64) -> &mut Self {
        self.max = max;
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
        connection.set_filter_range(&self.name, self.min, self.max, self.exclude);
    }
}

impl fmt::Display for FilterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_between(f, &self.name, self.exclude, self.min, self.max)
    }
}

/// Matches documents whose float attribute lies within `min..=max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFloatRange {
    name: String,
    min: f64,
    max: f64,
    #[serde(default)]
    exclude: bool,
}

impl FilterFloatRange {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self { name: name.into(), min, max, exclude: false }
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
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_min(&mut self, min: f64) -> &mut Self {
        self.min = min;
        self
    }

    pub fn set_max(&mut self, max: f64) -> &mut Self {
        self.max = max;
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
        connection.set_filter_float_range(&self.name, self.min, self.max, self.exclude);
    }
}

impl fmt::Display for FilterFloatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_between(f, &self.name, self.exclude, self.min, self.max)
    }
}

fn write_between<T: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, exclude: bool, min: T, max: T) -> fmt::Result {
    let kind = if exclude { "is not" } else { "is" };
    write!(f, "\"{name}\" {kind} between {min} and {max}")
}
