// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use serde::{Deserialize, Serialize};

use crate::connection::SearchConnection;
use crate::error::SearchError;

pub const SORT_FIELD_ID: &str = "@id";
pub const SORT_FIELD_WEIGHT: &str = "@weight";
pub const SORT_FIELD_RANK: &str = "@rank";
pub const SORT_FIELD_RELEVANCE: &str = "@relevance";
pub const SORT_FIELD_RANDOM: &str = "@random";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Relevance,
    AttributeDesc,
    AttributeAsc,
    TimeSegments,
    /// SQL-like clause, e.g. `@weight DESC, price ASC`
    Advanced,
    Expression,
}

impl SortMode {
    /// searchd wire code
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            SortMode::Relevance => 0,
            SortMode::AttributeDesc => 1,
            SortMode::AttributeAsc => 2,
            SortMode::TimeSegments => 3,
            SortMode::Advanced => 4,
            SortMode::Expression => 5,
        }
    }
}

impl TryFrom<u32> for SortMode {
    type Error = SearchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SortMode::Relevance),
            1 => Ok(SortMode::AttributeDesc),
            2 => Ok(SortMode::AttributeAsc),
            3 => Ok(SortMode::TimeSegments),
            4 => Ok(SortMode::Advanced),
            5 => Ok(SortMode::Expression),
            _ => Err(SearchError::InvalidEnumValue { kind: "sort mode", value }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy {
    #[serde(default)]
    mode: SortMode,
    #[serde(default)]
    sort_by: String,
}

impl SortBy {
    pub fn new(mode: SortMode, sort_by: impl Into<String>) -> Self {
        Self { mode, sort_by: sort_by.into() }
    }

    #[must_use]
    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SortMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Sets the mode from a wire code, rejecting unknown codes.
    pub fn set_mode_code(&mut self, code: u32) -> Result<&mut Self, SearchError> {
        self.mode = SortMode::try_from(code)?;
        Ok(self)
    }

    #[must_use]
    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn set_sort_by(&mut self, sort_by: impl Into<String>) -> &mut Self {
        self.sort_by = sort_by.into();
        self
    }

    pub fn bind<C: SearchConnection + ?Sized>(&self, connection: &mut C) {
        connection.set_sort_mode(self.mode, &self.sort_by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_relevance() {
        let sort = SortBy::default();
        assert_eq!(sort.mode(), SortMode::Relevance);
        assert_eq!(sort.sort_by(), "");
    }

    #[test]
    fn test_setters() {
        let mut sort = SortBy::default();
        sort.set_mode(SortMode::Advanced)
            .set_sort_by(format!("{SORT_FIELD_WEIGHT} DESC, {SORT_FIELD_ID} ASC"));
        assert_eq!(sort, SortBy::new(SortMode::Advanced, "@weight DESC, @id ASC"));
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(SortMode::try_from(4), Ok(SortMode::Advanced));
        assert_eq!(SortMode::Expression.code(), 5);

        let mut sort = SortBy::default();
        assert!(sort.set_mode_code(6).is_err());
        assert_eq!(sort.mode(), SortMode::Relevance);
        sort.set_mode_code(2).unwrap();
        assert_eq!(sort.mode(), SortMode::AttributeAsc);
    }
}
