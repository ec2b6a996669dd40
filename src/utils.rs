// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Helpers for escaping keywords and turning form input into filters.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use sphinx_search::utils::{create_filters_from_criteria, escape_query_string};
//!
//! assert_eq!(escape_query_string("me@me.com"), "me\\@me.com");
//!
//! let mappings = HashMap::from([("gender".to_string(), "gender_id".to_string())]);
//! let mut attribute_map = HashMap::new();
//! attribute_map.insert(
//!     "gender".to_string(),
//!     HashMap::from([("male".to_string(), 1), ("female".to_string(), 2)]),
//! );
//!
//! let filters = create_filters_from_criteria(
//!     [("gender", "male,female"), ("ignored", "3")],
//!     &mappings,
//!     &attribute_map,
//! );
//! assert_eq!(filters.len(), 1);
//! assert_eq!(filters[0].1.values(), &[1, 2]);
//! ```

use std::collections::HashMap;

use crate::filter::FilterAttribute;

/// Form key → string value → attribute integer.
pub type AttributeMap = HashMap<String, HashMap<String, i64>>;

/// Backslash-escapes every character with meaning in the extended query syntax.
///
/// Covers `$` and `=`, which the stock client escaper leaves alone.
#[must_use]
pub fn escape_query_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '(' | ')' | '|' | '-' | '!' | '@' | '~' | '"' | '&' | '/' | '^' | '$' | '=' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Splits `value` on `separator` (after trimming) if it contains one,
/// otherwise returns it as the single element.
#[must_use]
pub fn convert_string_to_array(value: &str, separator: &str) -> Vec<String> {
    if !separator.is_empty() && value.contains(separator) {
        value.trim().split(separator).map(str::to_string).collect()
    } else {
        vec![value.to_string()]
    }
}

/// Converts a form value into an attribute integer.
///
/// When `key` has an entry in `attribute_map`, the value is looked up there
/// and unknown values yield `None`. Otherwise the leading integer of the
/// trimmed value is used (non-numeric text becomes `0`). Blank input yields
/// `None`.
#[must_use]
pub fn prepare_attribute_value(value: &str, key: Option<&str>, attribute_map: &AttributeMap) -> Option<i64> {
    if let Some(mapped) = key.and_then(|k| attribute_map.get(k)) {
        return mapped.get(value).copied();
    }

    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(leading_integer(trimmed))
    }
}

/// Builds attribute filters from form criteria.
///
/// Only keys present in `mappings` are considered; the mapping gives the
/// index attribute name. Values may be comma separated. Keys whose values
/// all fail [`prepare_attribute_value`] produce no filter. The original form
/// key is returned next to each filter, in input order.
pub fn create_filters_from_criteria<I, K, V>(
    criteria: I,
    mappings: &HashMap<String, String>,
    attribute_map: &AttributeMap,
) -> Vec<(String, FilterAttribute)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut filters = Vec::new();

    for (key, value) in criteria {
        let key = key.as_ref();
        let Some(attribute) = mappings.get(key) else {
            continue;
        };

        let values: Vec<i64> = convert_string_to_array(value.as_ref(), ",")
            .iter()
            .filter_map(|v| prepare_attribute_value(v, Some(key), attribute_map))
            .collect();

        if !values.is_empty() {
            filters.push((key.to_string(), FilterAttribute::new(attribute.clone(), values)));
        }
    }

    filters
}

/// Integer prefix of `value`, `0` when there is none.
fn leading_integer(value: &str) -> i64 {
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);

    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape_query_string("a-b"), "a\\-b");
        assert_eq!(escape_query_string("(x|y)"), "\\(x\\|y\\)");
        assert_eq!(escape_query_string("$10 = ~5"), "\\$10 \\= \\~5");
        assert_eq!(escape_query_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_query_string("plain words"), "plain words");
    }

    #[test]
    fn test_convert_string_to_array() {
        assert_eq!(convert_string_to_array("1,2,3", ","), vec!["1", "2", "3"]);
        assert_eq!(convert_string_to_array(" 1|2 ", "|"), vec!["1", "2"]);
        assert_eq!(convert_string_to_array("single", ","), vec!["single"]);
    }

    #[test]
    fn test_prepare_attribute_value_without_map() {
        let map = AttributeMap::new();
        assert_eq!(prepare_attribute_value(" 12 ", None, &map), Some(12));
        assert_eq!(prepare_attribute_value("12abc", None, &map), Some(12));
        assert_eq!(prepare_attribute_value("abc", None, &map), Some(0));
        assert_eq!(prepare_attribute_value("-4", None, &map), Some(-4));
        assert_eq!(prepare_attribute_value("   ", None, &map), None);
    }

    #[test]
    fn test_prepare_attribute_value_with_map() {
        let mut map = AttributeMap::new();
        map.insert("gender".into(), HashMap::from([("male".to_string(), 1)]));

        assert_eq!(prepare_attribute_value("male", Some("gender"), &map), Some(1));
        assert_eq!(prepare_attribute_value("other", Some("gender"), &map), None);
        // keys without a map entry fall back to integer parsing
        assert_eq!(prepare_attribute_value("7", Some("age"), &map), Some(7));
    }

    #[test]
    fn test_create_filters_skips_unmapped_and_empty() {
        let mappings = HashMap::from([
            ("age".to_string(), "age_attr".to_string()),
            ("blank".to_string(), "blank_attr".to_string()),
        ]);

        let filters = create_filters_from_criteria(
            vec![("age", "18,21"), ("blank", " "), ("other", "1")],
            &mappings,
            &AttributeMap::new(),
        );

        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].0, "age");
        assert_eq!(filters[0].1.name(), "age_attr");
        assert_eq!(filters[0].1.values(), &[18, 21]);
    }
}
