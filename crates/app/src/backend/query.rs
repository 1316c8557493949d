//! PostgREST query strings

use std::fmt::{self, Display, Formatter};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Asc,

    /// Largest first.
    Desc,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        })
    }
}

/// Filters, ordering, and paging for a table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    offset: Option<u64>,
    limit: Option<u64>,
}

impl Query {
    /// Query with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return; defaults to all.
    #[must_use]
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    /// Keep rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Display) -> Self {
        self.filters.push((column.into(), format!("eq.{value}")));
        self
    }

    /// Keep rows where `column` contains `value`, ignoring case.
    #[must_use]
    pub fn ilike(mut self, column: impl Into<String>, value: &str) -> Self {
        let pattern = value.replace('*', "");

        self.filters
            .push((column.into(), format!("ilike.*{pattern}*")));
        self
    }

    /// Sort by `column`.
    #[must_use]
    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    /// Skip `offset` rows and return at most `limit`.
    #[must_use]
    pub fn range(mut self, offset: u64, limit: u64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    /// Return at most `limit` rows.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in a stable order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 4);

        pairs.push((
            "select".to_string(),
            self.select.clone().unwrap_or_else(|| "*".to_string()),
        ));

        pairs.extend(self.filters.iter().cloned());

        if let Some((column, direction)) = &self.order {
            pairs.push(("order".to_string(), format!("{column}.{direction}")));
        }

        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }

    /// Filter pairs only, for updates and deletes.
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }
}

/// Total row count from a `Content-Range` header such as `0-9/57` or `*/0`.
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;

    total.parse().ok()
}
