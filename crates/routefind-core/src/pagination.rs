//! Client-side pagination over an in-memory route list.

use serde::Serialize;

/// One page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a, T> {
    /// Items on this page.
    pub items: &'a [T],
    /// 1-based page number after clamping.
    pub page: usize,
    /// Total number of pages; at least 1 even for an empty list.
    pub total_pages: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
    /// 0-based index of the first item on this page.
    pub start_index: usize,
}

impl<T> PageView<'_, T> {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `total_items`, never less than 1.
#[must_use]
pub const fn total_pages(total_items: usize, page_size: usize) -> usize {
    let size = if page_size == 0 { 1 } else { page_size };
    let pages = total_items.div_ceil(size);
    if pages == 0 { 1 } else { pages }
}

/// Slice out page `page` (1-based) of `items`.
///
/// Page 0 is treated as page 1, pages past the end are clamped to the last
/// page, and a `page_size` of 0 is treated as 1.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageView<'_, T> {
    let size = page_size.max(1);
    let total_pages = total_pages(items.len(), size);
    let page = page.clamp(1, total_pages);
    let start_index = (page - 1) * size;
    let end = (start_index + size).min(items.len());

    PageView {
        items: &items[start_index.min(items.len())..end],
        page,
        total_pages,
        total_items: items.len(),
        start_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_pages() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(&items, 1, 10);
        assert_eq!(first.items, &items[..10]);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, &[21, 22, 23, 24, 25]);
        assert_eq!(last.start_index, 20);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&items, 0, 2).page, 1);
        let view = paginate(&items, 99, 2);
        assert_eq!(view.page, 3);
        assert_eq!(view.items, &[5]);
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        let view = paginate(&items, 4, 10);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 1);
        assert!(view.items.is_empty());
        assert!(!view.has_next());
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let items = [1, 2, 3];
        let view = paginate(&items, 2, 0);
        assert_eq!(view.items, &[2]);
        assert_eq!(view.total_pages, 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(0, 10), 1);
    }
}
