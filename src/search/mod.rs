// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query String Construction
//!
//! Builds Sphinx extended-syntax query strings from typed pieces.
//!
//! # Composition
//!
//! ```text
//! Builder (bound to a SearchIndex)
//!     ↓
//!     ├─→ Field "@(name,address)"
//!     │     └─→ Criteria  ("jim alex"|bob) bob << "alex smith"
//!     └─→ Field "@!address[30]"
//!           └─→ Criteria  plymouth
//!
//! → (@(name,address) ("jim alex"|bob) bob << "alex smith") (@!address[30] plymouth)
//! ```
//!
//! # Operators
//!
//! ```text
//! a b            - all of
//! (a|b)          - any of
//! a << b         - strict order
//! -a             - not
//! "a b"~N        - proximity
//! "a b c"/N      - quorum
//! ^a / a$        - field start / end
//! @name[N]       - field, first N words
//! @!(a,b)        - anything but these fields
//! ```

mod builder;
mod criteria;
mod field;
mod index;
mod phrase;

pub use builder::{Builder, CriteriaMut, FieldMut};
pub use criteria::Criteria;
pub use field::Field;
pub use index::{RecordFactory, ResultSetFactory, SearchIndex};
pub use phrase::Phrase;
