// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Relevance ranker applied to extended-syntax matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Phrase proximity plus BM25
    #[default]
    ProximityBm25,
    Bm25,
    /// All matches weigh 1
    None,
    WordCount,
    Proximity,
    MatchAny,
    FieldMask,
    Sph04,
    Expression,
}

impl RankingMode {
    /// searchd wire code
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            RankingMode::ProximityBm25 => 0,
            RankingMode::Bm25 => 1,
            RankingMode::None => 2,
            RankingMode::WordCount => 3,
            RankingMode::Proximity => 4,
            RankingMode::MatchAny => 5,
            RankingMode::FieldMask => 6,
            RankingMode::Sph04 => 7,
            RankingMode::Expression => 8,
        }
    }
}

impl TryFrom<u32> for RankingMode {
    type Error = SearchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RankingMode::ProximityBm25),
            1 => Ok(RankingMode::Bm25),
            2 => Ok(RankingMode::None),
            3 => Ok(RankingMode::WordCount),
            4 => Ok(RankingMode::Proximity),
            5 => Ok(RankingMode::MatchAny),
            6 => Ok(RankingMode::FieldMask),
            7 => Ok(RankingMode::Sph04),
            8 => Ok(RankingMode::Expression),
            _ => Err(SearchError::InvalidEnumValue { kind: "ranking mode", value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in 0..=8 {
            assert_eq!(RankingMode::try_from(code).map(RankingMode::code), Ok(code));
        }
        assert!(RankingMode::try_from(9).is_err());
    }

    #[test]
    fn test_default_ranker() {
        assert_eq!(RankingMode::default(), RankingMode::ProximityBm25);
    }
}
