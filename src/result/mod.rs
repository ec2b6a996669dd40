// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Result mapping.
//!
//! ```text
//! RawResult ──(index result set strategy)──→ ResultSet
//!                                              │ iter()
//!   RawMatch ──(index record strategy)──────→ ResultRecord
//! ```

mod raw;
mod record;
mod result_set;

pub use raw::{DocumentId, RawMatch, RawResult, WordStats};
pub use record::ResultRecord;
pub use result_set::ResultSet;
