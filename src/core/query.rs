//! Filtering and pagination for record queries

use crate::core::record::Record;
use crate::core::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of records returned when a page size is missing or unusable
pub const DEFAULT_TOP: usize = 10;

/// Filter criteria for [`crate::core::store::EventStore::query`]
///
/// Every criterion is optional; the ones that are set must all match.
///
/// - `author`, `title`, `description`: case-insensitive substring
/// - `event_type`, `status`, `hall`: exact match
/// - `date_from`/`date_to`, `created_at_from`/`created_at_to`,
///   `guests_min`/`guests_max`: inclusive ranges. A record without the
///   ranged field never matches a range on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFilter {
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub hall: Option<String>,
    #[serde(with = "timestamp::iso_option")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::iso_option")]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::iso_option")]
    pub created_at_from: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::iso_option")]
    pub created_at_to: Option<DateTime<Utc>>,
    pub guests_min: Option<i64>,
    pub guests_max: Option<i64>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn hall(mut self, hall: impl Into<String>) -> Self {
        self.hall = Some(hall.into());
        self
    }

    pub fn date_between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn guests_between(mut self, min: i64, max: i64) -> Self {
        self.guests_min = Some(min);
        self.guests_max = Some(max);
        self
    }

    /// Whether `record` satisfies every criterion that is set
    pub fn matches(&self, record: &Record) -> bool {
        contains_ci(Some(record.author.as_str()), self.author.as_deref())
            && contains_ci(record.title.as_deref(), self.title.as_deref())
            && contains_ci(Some(record.description.as_str()), self.description.as_deref())
            && equals(record.event_type.as_deref(), self.event_type.as_deref())
            && equals(record.status.as_deref(), self.status.as_deref())
            && equals(record.hall.as_deref(), self.hall.as_deref())
            && in_range(record.date, self.date_from, self.date_to)
            && in_range(Some(record.created_at), self.created_at_from, self.created_at_to)
            && in_range(record.guests_count, self.guests_min, self.guests_max)
    }
}

/// Case-insensitive substring test; an empty needle matches everything
pub(crate) fn contains_ci(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase())),
    }
}

fn equals(value: Option<&str>, expected: Option<&str>) -> bool {
    match expected {
        None | Some("") => true,
        Some(expected) => value == Some(expected),
    }
}

fn in_range<T: PartialOrd + Copy>(value: Option<T>, from: Option<T>, to: Option<T>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    from.is_none_or(|from| value >= from) && to.is_none_or(|to| value <= to)
}

/// Offset-based page request (`skip` records, then take `top`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub top: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            top: DEFAULT_TOP,
        }
    }
}

impl PageRequest {
    /// Normalize raw offsets: a negative `skip` becomes 0 and a `top` of 0
    /// or less becomes [`DEFAULT_TOP`], each with a warning
    pub fn new(skip: i64, top: i64) -> Self {
        let skip = usize::try_from(skip).unwrap_or_else(|_| {
            tracing::warn!(skip, "negative skip, using 0");
            0
        });
        let top = match usize::try_from(top) {
            Ok(top) if top > 0 => top,
            _ => {
                tracing::warn!(top, "non-positive top, using {}", DEFAULT_TOP);
                DEFAULT_TOP
            }
        };
        Self { skip, top }
    }

    /// Read `skip`/`top` from loosely typed input (query strings, form data)
    ///
    /// Numbers and numeric strings are accepted; anything else falls back to
    /// the default with a warning.
    pub fn from_json(params: &Value) -> Self {
        let skip = lenient_int(params.get("skip"), "skip", 0);
        let top = lenient_int(params.get("top"), "top", DEFAULT_TOP as i64);
        Self::new(skip, top)
    }
}

fn lenient_int(value: Option<&Value>, name: &str, default: i64) -> i64 {
    let parsed = match value {
        None | Some(Value::Null) => return default,
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!(param = name, ?value, "non-numeric pagination parameter, using {}", default);
        default
    })
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }

    /// Offset of the first item of this page
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}
