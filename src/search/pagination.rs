//! Page arithmetic.
//!
//! Both functions expect `page >= 1` and `per_page >= 1`; the gateway rejects
//! anything else before calling in here.

use super::types::Pagination;

/// Number of matches to skip before the requested page.
pub fn offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

pub fn describe(page: u32, per_page: u32, total_matches: u64) -> Pagination {
    Pagination {
        page_number: page,
        per_page,
        total_matches,
        total_pages: total_matches.div_ceil(u64::from(per_page.max(1))),
    }
}
