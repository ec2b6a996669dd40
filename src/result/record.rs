// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::raw::{DocumentId, RawMatch};

/// One matched document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    id: DocumentId,
    weight: i64,
    attributes: BTreeMap<String, Value>,
}

impl ResultRecord {
    pub fn new(id: DocumentId, weight: i64, attributes: BTreeMap<String, Value>) -> Self {
        Self { id, weight, attributes }
    }

    /// Default record strategy for [`SearchIndex`](crate::search::SearchIndex).
    pub fn from_match(id: DocumentId, raw: &RawMatch) -> Self {
        Self::new(id, raw.weight, raw.attrs.clone())
    }

    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    #[must_use]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.attributes.get(name).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_match() {
        let raw = RawMatch::new(7, 1200).with_attr("age", 30).with_attr("tags", json!([1, 2]));
        let record = ResultRecord::from_match(7, &raw);

        assert_eq!(record.id(), 7);
        assert_eq!(record.weight(), 1200);
        assert_eq!(record.attributes().len(), 2);
        assert_eq!(record.attribute("age"), Some(&json!(30)));
        assert_eq!(record.attribute("missing"), None);
    }

    #[test]
    fn test_attribute_or() {
        let record = ResultRecord::from_match(1, &RawMatch::new(1, 0).with_attr("age", 30));
        let fallback = json!("n/a");
        assert_eq!(record.attribute_or("age", &fallback), &json!(30));
        assert_eq!(record.attribute_or("name", &fallback), &fallback);
    }
}
