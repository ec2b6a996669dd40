// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use serde::{Deserialize, Serialize};

use crate::connection::SearchConnection;
use crate::error::SearchError;

/// How grouped values are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFunction {
    Day,
    Week,
    Month,
    Year,
    #[default]
    Attribute,
    AttributePair,
}

impl GroupFunction {
    /// searchd wire code
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            GroupFunction::Day => 0,
            GroupFunction::Week => 1,
            GroupFunction::Month => 2,
            GroupFunction::Year => 3,
            GroupFunction::Attribute => 4,
            GroupFunction::AttributePair => 5,
        }
    }
}

impl TryFrom<u32> for GroupFunction {
    type Error = SearchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GroupFunction::Day),
            1 => Ok(GroupFunction::Week),
            2 => Ok(GroupFunction::Month),
            3 => Ok(GroupFunction::Year),
            4 => Ok(GroupFunction::Attribute),
            5 => Ok(GroupFunction::AttributePair),
            _ => Err(SearchError::InvalidEnumValue { kind: "group by function", value }),
        }
    }
}

pub const DEFAULT_GROUP_SORT: &str = "@group DESC";

/// Groups matches by an attribute and orders the groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBy {
    attribute: String,
    #[serde(default)]
    function: GroupFunction,
    #[serde(default = "default_group_sort")]
    group_sort: String,
}

fn default_group_sort() -> String {
    DEFAULT_GROUP_SORT.to_string()
}

impl GroupBy {
    pub fn new(attribute: impl Into<String>, function: GroupFunction, group_sort: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            function,
            group_sort: group_sort.into(),
        }
    }

    /// Group by the attribute value, groups ordered `@group DESC`.
    pub fn attribute(attribute: impl Into<String>) -> Self {
        Self::new(attribute, GroupFunction::Attribute, DEFAULT_GROUP_SORT)
    }

    #[must_use]
    pub fn attribute_name(&self) -> &str {
        &self.attribute
    }

    pub fn set_attribute(&mut self, attribute: impl Into<String>) -> &mut Self {
        self.attribute = attribute.into();
        self
    }

    #[must_use]
    pub fn function(&self) -> GroupFunction {
        self.function
    }

    pub fn set_function(&mut self, function: GroupFunction) -> &mut Self {
        self.function = function;
        self
    }

    /// Sets the function from a wire code, rejecting unknown codes.
    pub fn set_function_code(&mut self, code: u32) -> Result<&mut Self, SearchError> {
        self.function = GroupFunction::try_from(code)?;
        Ok(self)
    }

    #[must_use]
    pub fn group_sort(&self) -> &str {
        &self.group_sort
    }

    pub fn set_group_sort(&mut self, group_sort: impl Into<String>) -> &mut Self {
        self.group_sort = group_sort.into();
        self
    }

    pub fn bind<C: SearchConnection + ?Sized>(&self, connection: &mut C) {
        connection.set_group_by(&self.attribute, self.function, &self.group_sort);
    }
}

impl Default for GroupBy {
    fn default() -> Self {
        Self::attribute("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let group = GroupBy::default();
        assert_eq!(group.attribute_name(), "");
        assert_eq!(group.function(), GroupFunction::Attribute);
        assert_eq!(group.group_sort(), "@group DESC");
    }

    #[test]
    fn test_setters() {
        let mut group = GroupBy::attribute("gender");
        group.set_function(GroupFunction::Week).set_group_sort("@count desc").set_attribute("created");
        assert_eq!(group, GroupBy::new("created", GroupFunction::Week, "@count desc"));
    }

    #[test]
    fn test_function_codes() {
        for function in [
            GroupFunction::Day,
            GroupFunction::Week,
            GroupFunction::Month,
            GroupFunction::Year,
            GroupFunction::Attribute,
            GroupFunction::AttributePair,
        ] {
            assert_eq!(GroupFunction::try_from(function.code()), Ok(function));
        }
    }

    #[test]
    fn test_invalid_function_code() {
        let mut group = GroupBy::default();
        assert_eq!(
            group.set_function_code(99).err(),
            Some(SearchError::InvalidEnumValue { kind: "group by function", value: 99 })
        );
        assert_eq!(group.function(), GroupFunction::Attribute);
    }
}
