// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search queries.
//!
//! A [`SearchQuery`] gathers everything searchd needs for one query against
//! one index: the keyword string (or a [`Builder`] that renders one),
//! attribute filters, grouping, sorting, limits and the ranker.
//!
//! # Binding
//!
//! ```text
//! reset_filters, reset_group_by
//! set_ranking_mode
//! set_group_by            (only when grouped)
//! set_sort_mode
//! set_limits
//! set_filter*             (insertion order)
//! add_query(query, index) → id
//! ```
//!
//! The keyword string is the explicit query if set, else the builder's
//! rendering, else empty (match all).
//!
//! # Example
//!
//! ```
//! use sphinx_search::{SearchIndex, SearchQuery};
//! use sphinx_search::filter::FilterRange;
//!
//! let index = SearchIndex::new("people").field("name").attribute("age").shared();
//!
//! let mut query = SearchQuery::new(&index);
//! query.set_query("bob").add_filter(FilterRange::new("age", 18, 30));
//! query.add_filter(FilterRange::new("height", 1, 2)); // not an attribute: dropped
//!
//! assert_eq!(query.filters().len(), 1);
//! assert_eq!(query.to_string(), "\"bob\" using index \"people\" where \"age\" is between 18 and 30");
//! ```

mod group_by;
mod limits;
mod ranking;
mod sort_by;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::connection::SearchConnection;
use crate::error::SearchError;
use crate::filter::{Filter, FilterAttribute};
use crate::search::{Builder, SearchIndex};

pub use group_by::{GroupBy, GroupFunction, DEFAULT_GROUP_SORT};
pub use limits::Limits;
pub use ranking::RankingMode;
pub use sort_by::{
    SortBy, SortMode, SORT_FIELD_ID, SORT_FIELD_RANDOM, SORT_FIELD_RANK, SORT_FIELD_RELEVANCE,
    SORT_FIELD_WEIGHT,
};

/// Group sort used by [`SearchQuery::add_group_by`] when none is given.
pub const ADD_GROUP_BY_SORT: &str = "@group desc";

#[derive(Debug, Clone)]
pub struct SearchQuery {
    id: u32,
    index: Arc<SearchIndex>,
    filters: Vec<Filter>,
    query: Option<String>,
    builder: Option<Builder>,
    ranking_mode: RankingMode,
    group_by: Option<GroupBy>,
    sort_by: SortBy,
    limits: Limits,
}

impl SearchQuery {
    /// An unbound query matching everything in `index`.
    #[must_use]
    pub fn new(index: &Arc<SearchIndex>) -> Self {
        Self {
            id: 0,
            index: Arc::clone(index),
            filters: Vec::new(),
            query: None,
            builder: None,
            ranking_mode: RankingMode::default(),
            group_by: None,
            sort_by: SortBy::default(),
            limits: Limits::default(),
        }
    }

    /// Correlation id from the last bind, `0` before the first.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    // ---- keywords ----

    /// The explicit keyword string, if one was set.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = Some(query.into());
        self
    }

    pub fn clear_query(&mut self) -> &mut Self {
        self.query = None;
        self
    }

    /// The keyword string sent at bind time.
    #[must_use]
    pub fn query_string(&self) -> String {
        match (&self.query, &self.builder) {
            (Some(query), _) => query.clone(),
            (None, Some(builder)) => builder.query(),
            (None, None) => String::new(),
        }
    }

    /// Sets the query to `keywords` scoped to a comma separated field list.
    pub fn query_in_fields(&mut self, fields: &str, keywords: &str) -> Result<&mut Self, SearchError> {
        let query = self.index.create_field_query_string(fields, keywords)?;
        self.query = Some(query);
        Ok(self)
    }

    /// Sets the query to `keywords`, wrapped in wildcards when the index
    /// supports them.
    pub fn create_wildcard_query_string(&mut self, keywords: &str) -> &mut Self {
        self.query = Some(self.index.create_wildcard_query_string(keywords));
        self
    }

    #[must_use]
    pub fn builder(&self) -> Option<&Builder> {
        self.builder.as_ref()
    }

    pub fn builder_mut(&mut self) -> Option<&mut Builder> {
        self.builder.as_mut()
    }

    /// Attaches a builder, which must target this query's index.
    pub fn set_query_builder(&mut self, builder: Builder) -> Result<&mut Self, SearchError> {
        if !Arc::ptr_eq(builder.index(), &self.index) {
            return Err(SearchError::IndexMismatch {
                builder: builder.index().name().to_string(),
                query: self.index.name().to_string(),
            });
        }
        self.builder = Some(builder);
        Ok(self)
    }

    /// Attaches a fresh builder for this query's index and returns it.
    pub fn create_query_builder(&mut self) -> &mut Builder {
        self.builder.insert(Builder::find(&self.index))
    }

    // ---- ranking / grouping / sorting / limits ----

    #[must_use]
    pub fn ranking_mode(&self) -> RankingMode {
        self.ranking_mode
    }

    pub fn rank_by(&mut self, mode: RankingMode) -> &mut Self {
        self.ranking_mode = mode;
        self
    }

    #[must_use]
    pub fn group_by(&self) -> Option<&GroupBy> {
        self.group_by.as_ref()
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) -> &mut Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn clear_group_by(&mut self) -> &mut Self {
        self.group_by = None;
        self
    }

    /// Groups by an index attribute; `group_sort` defaults to `@group desc`.
    pub fn add_group_by(
        &mut self,
        attribute: &str,
        function: GroupFunction,
        group_sort: Option<&str>,
    ) -> Result<&mut Self, SearchError> {
        if !self.index.is_valid_attribute(attribute) {
            return Err(SearchError::InvalidAttribute {
                attribute: attribute.to_string(),
                index: self.index.name().to_string(),
            });
        }
        self.group_by = Some(GroupBy::new(attribute, function, group_sort.unwrap_or(ADD_GROUP_BY_SORT)));
        Ok(self)
    }

    #[must_use]
    pub fn sort_by(&self) -> &SortBy {
        &self.sort_by
    }

    pub fn sort_by_mut(&mut self) -> &mut SortBy {
        &mut self.sort_by
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) -> &mut Self {
        self.sort_by = sort_by;
        self
    }

    pub fn add_sort_by(&mut self, mode: SortMode, sort_by: impl Into<String>) -> &mut Self {
        self.sort_by = SortBy::new(mode, sort_by);
        self
    }

    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn limits_mut(&mut self) -> &mut Limits {
        &mut self.limits
    }

    pub fn set_limits(&mut self, limits: Limits) -> &mut Self {
        self.limits = limits;
        self
    }

    pub fn limit(&mut self, offset: u32, limit: u32, max_results: u32) -> &mut Self {
        self.limits = Limits::new(offset, limit, max_results);
        self
    }

    // ---- filters ----

    /// Filters in the order they were first added.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub fn filter(&self, attribute: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.name() == attribute)
    }

    /// The filter for `attribute`, creating an empty attribute filter if the
    /// index declares it.
    pub fn filter_mut(&mut self, attribute: &str) -> Result<&mut Filter, SearchError> {
        let position = match self.position(attribute) {
            Some(position) => position,
            None if self.index.is_valid_attribute(attribute) => {
                self.filters.push(FilterAttribute::new(attribute, Vec::new()).into());
                self.filters.len() - 1
            }
            None => {
                return Err(SearchError::UnknownFilter {
                    attribute: attribute.to_string(),
                    index: self.index.name().to_string(),
                })
            }
        };
        Ok(&mut self.filters[position])
    }

    /// Adds or replaces the filter for its attribute.
    ///
    /// Filters on attributes the index does not declare are dropped, so
    /// optional filters can be added without checking first.
    pub fn add_filter(&mut self, filter: impl Into<Filter>) -> &mut Self {
        let filter = filter.into();
        if !self.index.is_valid_attribute(filter.name()) {
            debug!(index = %self.index.name(), attribute = %filter.name(), "Dropping filter on unknown attribute");
            return self;
        }

        match self.position(filter.name()) {
            Some(position) => self.filters[position] = filter,
            None => self.filters.push(filter),
        }
        self
    }

    pub fn remove_filter(&mut self, attribute: &str) -> &mut Self {
        self.filters.retain(|f| f.name() != attribute);
        self
    }

    pub fn clear_filters(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    fn position(&self, attribute: &str) -> Option<usize> {
        self.filters.iter().position(|f| f.name() == attribute)
    }

    // ---- binding ----

    /// Applies this query to `connection` and registers it, returning the
    /// assigned correlation id.
    pub fn bind<C: SearchConnection + ?Sized>(&mut self, connection: &mut C) -> u32 {
        connection.reset_filters();
        connection.reset_group_by();
        connection.set_ranking_mode(self.ranking_mode);

        if let Some(group_by) = &self.group_by {
            group_by.bind(connection);
        }
        self.sort_by.bind(connection);
        self.limits.bind(connection);
        for filter in &self.filters {
            filter.bind(connection);
        }

        let query = self.query_string();
        self.id = connection.add_query(&query, self.index.name());

        debug!(
            index = %self.index.name(),
            id = self.id,
            filters = self.filters.len(),
            "Bound search query"
        );
        self.id
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" using index \"{}\"", self.query_string(), self.index.name())?;

        let filters: Vec<String> = self.filters.iter().map(Filter::to_string).collect();
        if !filters.is_empty() {
            write!(f, " where {}", filters.join(" and "))?;
        }
        Ok(())
    }
}
