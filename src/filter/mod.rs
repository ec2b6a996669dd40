// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Attribute filters.
//!
//! ```text
//! Attribute   "gender_id" includes "1, 2"      → set_filter
//! Range       "age" is between 18 and 30       → set_filter_range
//! FloatRange  "price" is not between 1 and 5   → set_filter_float_range
//! ```
//!
//! Filters only apply to attributes declared on the index; see
//! [`SearchQuery::add_filter`](crate::SearchQuery::add_filter).

mod attribute;
mod range;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::connection::SearchConnection;

pub use attribute::FilterAttribute;
pub use range::{FilterFloatRange, FilterRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    Attribute(FilterAttribute),
    Range(FilterRange),
    FloatRange(FilterFloatRange),
}

impl Filter {
    /// The attribute this filter applies to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Filter::Attribute(f) => f.name(),
            Filter::Range(f) => f.name(),
            Filter::FloatRange(f) => f.name(),
        }
    }

    #[must_use]
    pub fn exclude(&self) -> bool {
        match self {
            Filter::Attribute(f) => f.exclude(),
            Filter::Range(f) => f.exclude(),
            Filter::FloatRange(f) => f.exclude(),
        }
    }

    pub fn set_exclude(&mut self, exclude: bool) -> &mut Self {
        match self {
            Filter::Attribute(f) => {
                f.set_exclude(exclude);
            }
            Filter::Range(f) => {
                f.set_exclude(exclude);
            }
            Filter::FloatRange(f) => {
                f.set_exclude(exclude);
            }
        }
        self
    }

    pub fn bind<C: SearchConnection + ?Sized>(&self, connection: &mut C) {
        match self {
            Filter::Attribute(f) => f.bind(connection),
            Filter::Range(f) => f.bind(connection),
            Filter::FloatRange(f) => f.bind(connection),
        }
    }

    #[must_use]
    pub fn as_attribute(&self) -> Option<&FilterAttribute> {
        match self {
            Filter::Attribute(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_attribute_mut(&mut self) -> Option<&mut FilterAttribute> {
        match self {
            Filter::Attribute(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Attribute(filter) => filter.fmt(f),
            Filter::Range(filter) => filter.fmt(f),
            Filter::FloatRange(filter) => filter.fmt(f),
        }
    }
}

impl From<FilterAttribute> for Filter {
    fn from(filter: FilterAttribute) -> Self {
        Filter::Attribute(filter)
    }
}

impl From<FilterRange> for Filter {
    fn from(filter: FilterRange) -> Self {
        Filter::Range(filter)
    }
}

impl From<FilterFloatRange> for Filter {
    fn from(filter: FilterFloatRange) -> Self {
        Filter::FloatRange(filter)
    }
}
