//! Feed ordering and page-number pagination.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Post;
use crate::error::DomainError;

/// Column the feed is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DataCriacao,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Explicit feed ordering. Ties on the sort field are broken by `id` in the
/// same direction so pages never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOrdering {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FeedOrdering {
    /// Most recent first.
    pub const fn newest_first() -> Self {
        Self {
            field: SortField::DataCriacao,
            direction: SortDirection::Desc,
        }
    }

    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ascending = match self.field {
            SortField::DataCriacao => a
                .data_criacao
                .cmp(&b.data_criacao)
                .then_with(|| a.id.cmp(&b.id)),
            SortField::Id => a.id.cmp(&b.id),
        };

        match self.direction {
            SortDirection::Asc => ascending,
            SortDirection::Desc => ascending.reverse(),
        }
    }
}

impl Default for FeedOrdering {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// Parses the `-data_criacao` / `id` style used in configuration.
impl FromStr for FeedOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (direction, name) = match s.strip_prefix('-') {
            Some(name) => (SortDirection::Desc, name),
            None => (SortDirection::Asc, s),
        };
        let field = match name {
            "data_criacao" => SortField::DataCriacao,
            "id" => SortField::Id,
            other => return Err(format!("unknown ordering field: {other}")),
        };
        Ok(Self { field, direction })
    }
}

impl fmt::Display for FeedOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == SortDirection::Desc {
            write!(f, "-")?;
        }
        match self.field {
            SortField::DataCriacao => write!(f, "data_criacao"),
            SortField::Id => write!(f, "id"),
        }
    }
}

/// Feed configuration, passed explicitly to every feed query.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub ordering: FeedOrdering,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            ordering: FeedOrdering::newest_first(),
        }
    }
}

impl FeedConfig {
    /// Resolve caller-supplied page parameters against this configuration.
    pub fn page_request(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<PageRequest, DomainError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::InvalidPage);
        }

        let max = self.max_page_size.max(1);
        let page_size = page_size
            .unwrap_or(self.default_page_size)
            .clamp(1, max);

        // Offsets past i64::MAX cannot be sent to the database either.
        let in_range = (page - 1)
            .checked_mul(page_size)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !in_range {
            return Err(DomainError::InvalidPage);
        }

        Ok(PageRequest { page, page_size })
    }
}

/// A 1-based page number and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One page of results plus the totals needed to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        Self {
            results,
            count,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// An empty feed still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        self.count.div_ceil(self.page_size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
