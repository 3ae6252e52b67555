//! List envelope shared by every list and lookup endpoint.
//!
//! The envelope is a pure projection of a page of records, the requested page,
//! the total number of matching rows and the page size:
//!
//! ```json
//! { "records": [], "nbRecords": 0, "page": { "current": 1, "previous": null, "next": null, "last": 0 } }
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Records per page on every list endpoint.
pub const PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Page number reported by single-record lookups.
pub const LOOKUP_PAGE: i64 = 0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    pub current: i64,
    pub previous: Option<i64>,
    pub next: Option<i64>,
    pub last: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListEnvelope<T> {
    pub records: Vec<T>,
    #[serde(rename = "nbRecords")]
    pub nb_records: i64,
    pub page: PageLinks,
}

impl<T> ListEnvelope<T> {
    /// Envelope built from the records alone: page 1, count taken from the
    /// records, page size 1. An empty vector yields the "no records" shape.
    pub fn from_records(records: Vec<T>) -> Self {
        let count = i64::try_from(records.len()).unwrap_or(i64::MAX);
        paginate(records, 1, count, NonZeroU32::MIN)
    }

    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }
}

/// Number of pages needed for `total_count` rows; zero rows means zero pages.
pub fn last_page(total_count: i64, page_size: NonZeroU32) -> i64 {
    let size = i64::from(page_size.get());
    if total_count <= 0 {
        return 0;
    }
    (total_count - 1) / size + 1
}

pub fn paginate<T>(records: Vec<T>, current_page: i64, total_count: i64, page_size: NonZeroU32) -> ListEnvelope<T> {
    let last = last_page(total_count, page_size);
    let previous = (current_page > 1).then(|| current_page - 1);
    // Page 0 is a single-record lookup and links nowhere.
    let next = (current_page >= 1 && current_page < last).then(|| current_page + 1);

    ListEnvelope {
        records,
        nb_records: total_count,
        page: PageLinks { current: current_page, previous, next, last },
    }
}

/// Row offset of the first record on `page` (1-based). Saturates for pages
/// far past the end, which then simply match no rows.
pub fn offset(page: i64, page_size: NonZeroU32) -> i64 {
    (page.max(1) - 1).saturating_mul(i64::from(page_size.get()))
}

/// `?page=` as sent by the caller. Kept as a raw string so a malformed value
/// falls back to the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn current(&self) -> i64 {
        coerce_page(self.page.as_deref())
    }
}

pub fn coerce_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}
