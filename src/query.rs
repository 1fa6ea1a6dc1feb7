//! Listing queries over a directory store.
//!
//! A query is a [`ListFilter`] (search text and/or status) plus optional
//! [`Pagination`]. Filters never mutate the store and an empty result is a
//! valid answer. Results are always ordered by identifier ascending, so paging
//! through the same query is restartable and concatenates to the unpaged
//! result.

use serde::{Deserialize, Serialize};

use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::RecordStatus;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum allowed items per page.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Longest accepted search text, in characters.
pub const MAX_SEARCH_TEXT_LEN: usize = 128;

/// Page size bounds applied to incoming queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PAGE_SIZE,
            max_per_page: MAX_PAGE_SIZE,
        }
    }
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    /// Validates a page window against `limits`. Out-of-range input is
    /// rejected, never clamped.
    pub fn new(page: u32, per_page: u32, limits: &PageLimits) -> Result<Self, FrameworkError> {
        if page == 0 {
            return Err(FrameworkError::Validation(
                "page is 1-based and must be at least 1".to_string(),
            ));
        }
        if per_page == 0 || per_page > limits.max_per_page {
            return Err(FrameworkError::Validation(format!(
                "per_page must be between 1 and {}, got {}",
                limits.max_per_page, per_page
            )));
        }
        Ok(Self { page, per_page })
    }

    /// Builds a window from optional query parameters, filling in defaults.
    pub fn from_query(
        page: Option<u32>,
        per_page: Option<u32>,
        limits: &PageLimits,
    ) -> Result<Self, FrameworkError> {
        Self::new(
            page.unwrap_or(1),
            per_page.unwrap_or(limits.default_per_page),
            limits,
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of matching records to skip before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }

    pub fn limit(&self) -> usize {
        self.per_page as usize
    }

    /// Total number of pages for `total_items` matches. Never less than one.
    pub fn total_pages(&self, total_items: u64) -> u32 {
        let pages = total_items.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// Predicate narrowing a listing: optional search text and optional status.
///
/// The search text is stored lower-cased and matched as a substring of the
/// record's name or email. An absent status means "All".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<S> {
    text: Option<String>,
    status: Option<S>,
}

impl<S: RecordStatus> Default for ListFilter<S> {
    fn default() -> Self {
        Self::all()
    }
}

impl<S: RecordStatus> ListFilter<S> {
    /// Matches every record.
    pub fn all() -> Self {
        Self {
            text: None,
            status: None,
        }
    }

    pub fn by_status(status: S) -> Self {
        Self {
            text: None,
            status: Some(status),
        }
    }

    pub fn with_status(mut self, status: Option<S>) -> Self {
        self.status = status;
        self
    }

    /// Adds a search text. Whitespace-only text clears the text filter.
    pub fn with_text(mut self, text: &str) -> Result<Self, FrameworkError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.text = None;
            return Ok(self);
        }
        if trimmed.chars().count() > MAX_SEARCH_TEXT_LEN {
            return Err(FrameworkError::Validation(format!(
                "search text exceeds {MAX_SEARCH_TEXT_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(FrameworkError::Validation(
                "search text contains control characters".to_string(),
            ));
        }
        self.text = Some(trimmed.to_lowercase());
        Ok(self)
    }

    /// Parses raw filter input. A status of `"all"` (any case) or an empty
    /// string means no status restriction.
    pub fn parse(text: Option<&str>, status: Option<&str>) -> Result<Self, FrameworkError> {
        let status = match status.map(str::trim) {
            None => None,
            Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case("all") => None,
            Some(raw) => Some(
                raw.parse::<S>()
                    .map_err(|e| FrameworkError::Validation(e.to_string()))?,
            ),
        };
        let filter = Self::all().with_status(status);
        match text {
            Some(text) => filter.with_text(text),
            None => Ok(filter),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn status(&self) -> Option<S> {
        self.status
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Entity<Status = S>,
    {
        if let Some(status) = self.status {
            if record.status() != status {
                return false;
            }
        }
        match &self.text {
            Some(needle) => {
                record.name().to_lowercase().contains(needle.as_str())
                    || record.email().to_lowercase().contains(needle.as_str())
            }
            None => true,
        }
    }
}

/// A filter plus an optional page window. Without a window the whole match
/// set is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S> {
    pub filter: ListFilter<S>,
    pub pagination: Option<Pagination>,
}

impl<S: RecordStatus> ListQuery<S> {
    pub fn all() -> Self {
        Self::new(ListFilter::all())
    }

    pub fn new(filter: ListFilter<S>) -> Self {
        Self {
            filter,
            pagination: None,
        }
    }

    pub fn paged(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Untyped listing request as received from the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListQuery {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl RawListQuery {
    /// Validates the raw request. The result is unpaged only when neither
    /// `page` nor `per_page` was supplied.
    pub fn into_query<S: RecordStatus>(
        self,
        limits: &PageLimits,
    ) -> Result<ListQuery<S>, FrameworkError> {
        let filter = ListFilter::parse(self.text.as_deref(), self.status.as_deref())?;
        let query = ListQuery::new(filter);
        if self.page.is_none() && self.per_page.is_none() {
            return Ok(query);
        }
        Ok(query.paged(Pagination::from_query(self.page, self.per_page, limits)?))
    }
}

/// One page of listing results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page, identifier ascending.
    pub items: Vec<T>,
    /// Number of records matching the filter across all pages.
    pub total: u64,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Page size; equal to `total` for an unpaged listing.
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Option<&Pagination>) -> Self {
        match pagination {
            Some(pagination) => Self {
                items,
                total,
                page: pagination.page(),
                per_page: pagination.per_page(),
                total_pages: pagination.total_pages(total),
            },
            None => Self {
                items,
                total,
                page: 1,
                per_page: u32::try_from(total).unwrap_or(u32::MAX),
                total_pages: 1,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Number of records in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: u64,
}

/// Record counts per status, in the status enum's display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts<S> {
    pub counts: Vec<StatusCount<S>>,
    pub total: u64,
}

impl<S: RecordStatus> StatusCounts<S> {
    pub fn tally<'a, T, I>(records: I) -> Self
    where
        T: Entity<Status = S> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counts: Vec<StatusCount<S>> = S::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: 0,
            })
            .collect();
        let mut total = 0;
        for record in records {
            total += 1;
            if let Some(slot) = counts.iter_mut().find(|c| c.status == record.status()) {
                slot.count += 1;
            }
        }
        Self { counts, total }
    }

    pub fn count(&self, status: S) -> u64 {
        self.counts
            .iter()
            .find(|c| c.status == status)
            .map_or(0, |c| c.count)
    }
}
