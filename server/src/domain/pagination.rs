//! Page-number parsing and page window arithmetic
//!
//! Page numbers arrive as free-form query strings. They are read the lenient
//! way browsers and scripting front-ends build them: surrounding junk after the
//! leading integer is ignored (`"2abc"` is page 2, `"2.9"` is page 2). Anything
//! that does not yield a usable number lands on page 1, while a well-formed
//! page past the end of the catalog is reported as missing.

use std::ops::RangeInclusive;

use crate::core::constants::MAX_SAFE_INTEGER;

/// How many page links the navigation shows around the current page
pub const PAGE_LINKS_WIDTH: u64 = 5;

/// Resolve the `page` query parameter to a page number >= 1
///
/// Absent, non-numeric, zero, negative and values above 2^53 - 1 all clamp
/// to 1.
pub fn parse_page_param(raw: Option<&str>) -> u64 {
    match raw.and_then(parse_leading_integer) {
        Some(page) if (1..=MAX_SAFE_INTEGER as i128).contains(&page) => page as u64,
        _ => 1,
    }
}

/// Parse the integer prefix of `s`
///
/// Skips leading whitespace, accepts one sign and a `0x` prefix for
/// hexadecimal, then reads digits until the first non-digit. Returns `None`
/// when no digit was read. Magnitudes saturate instead of overflowing.
fn parse_leading_integer(s: &str) -> Option<i128> {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut magnitude: i128 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        magnitude = magnitude
            .saturating_mul(radix as i128)
            .saturating_add(d as i128);
    }

    if !seen {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

/// One page of an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page, 1-based
    pub page: u64,
    /// Total number of pages
    pub pages: u64,
    pub limit: u32,
    pub offset: u64,
}

impl PageWindow {
    /// Locate `page` in a listing of `total` rows split `per_page` at a time
    ///
    /// Returns `None` when the page lies beyond the last one, which includes
    /// every page of an empty listing.
    pub fn locate(page: u64, total: u64, per_page: u32) -> Option<Self> {
        let per_page = per_page.max(1);
        let pages = total.div_ceil(per_page as u64);
        if page == 0 || page > pages {
            return None;
        }

        Some(Self {
            page,
            pages,
            limit: per_page,
            offset: (page - 1).saturating_mul(per_page as u64),
        })
    }

    pub fn previous(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u64> {
        (self.page < self.pages).then(|| self.page + 1)
    }

    /// Page numbers to link, centred on the current page where possible
    pub fn links(&self, width: u64) -> RangeInclusive<u64> {
        let width = width.max(1);
        let start = self.page.saturating_sub(width / 2).max(1);
        let end = start.saturating_add(width - 1).min(self.pages);
        let start = end.saturating_sub(width - 1).max(1);
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_page_param(Some("1")), 1);
        assert_eq!(parse_page_param(Some("3")), 3);
        assert_eq!(parse_page_param(Some("+4")), 4);
    }

    #[test]
    fn test_parse_lenient_prefix() {
        assert_eq!(parse_page_param(Some("  2")), 2);
        assert_eq!(parse_page_param(Some("2abc")), 2);
        assert_eq!(parse_page_param(Some("2.9")), 2);
        assert_eq!(parse_page_param(Some("1e3")), 1);
        assert_eq!(parse_page_param(Some("0x10")), 16);
        assert_eq!(parse_page_param(Some("2,3")), 2);
    }

    #[test]
    fn test_parse_clamps_to_first_page() {
        assert_eq!(parse_page_param(None), 1);
        assert_eq!(parse_page_param(Some("")), 1);
        assert_eq!(parse_page_param(Some("abc")), 1);
        assert_eq!(parse_page_param(Some("0")), 1);
        assert_eq!(parse_page_param(Some("-5")), 1);
        assert_eq!(parse_page_param(Some("0x")), 1);
        assert_eq!(parse_page_param(Some("+")), 1);
    }

    #[test]
    fn test_parse_safe_integer_bound() {
        assert_eq!(
            parse_page_param(Some("9007199254740991")),
            9_007_199_254_740_991
        );
        assert_eq!(parse_page_param(Some("9007199254740992")), 1);
        assert_eq!(parse_page_param(Some("99999999999999999999999999999999999999999")), 1);
    }

    #[test]
    fn test_locate_first_and_last_page() {
        let first = PageWindow::locate(1, 5, 2).unwrap();
        assert_eq!(first.pages, 3);
        assert_eq!(first.offset, 0);
        assert_eq!(first.limit, 2);

        let last = PageWindow::locate(3, 5, 2).unwrap();
        assert_eq!(last.offset, 4);
    }

    #[test]
    fn test_locate_beyond_last_page() {
        assert!(PageWindow::locate(4, 5, 2).is_none());
        assert!(PageWindow::locate(9_007_199_254_740_991, 5, 2).is_none());
    }

    #[test]
    fn test_locate_empty_catalog() {
        assert!(PageWindow::locate(1, 0, 2).is_none());
    }

    #[test]
    fn test_locate_exact_multiple() {
        let window = PageWindow::locate(2, 4, 2).unwrap();
        assert_eq!(window.pages, 2);
        assert_eq!(window.offset, 2);
        assert_eq!(window.next(), None);
        assert_eq!(window.previous(), Some(1));
    }

    #[test]
    fn test_offsets_cover_every_row_once() {
        let total = 7;
        let mut covered = Vec::new();
        let mut page = 1;
        while let Some(window) = PageWindow::locate(page, total, 2) {
            let end = (window.offset + window.limit as u64).min(total);
            covered.extend(window.offset..end);
            page += 1;
        }
        assert_eq!(page - 1, 4);
        assert_eq!(covered, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn test_links_window() {
        let window = |page| PageWindow::locate(page, 20, 2).unwrap();

        assert_eq!(window(1).links(5), 1..=5);
        assert_eq!(window(5).links(5), 3..=7);
        assert_eq!(window(10).links(5), 6..=10);
        assert_eq!(PageWindow::locate(1, 3, 2).unwrap().links(5), 1..=2);
    }
}
