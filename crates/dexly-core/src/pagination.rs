// ── Pagination ──
//
// 1-indexed page slicing, page counts and the windowed page-number
// strip shown under the grid. Out-of-range input yields empty results,
// never a panic.

use serde::Serialize;

/// Page numbers shown at once by default.
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// Items `(page-1)*size .. page*size` of `items`, clamped to its length.
/// Page `0`, pages past the end, and `size == 0` all give an empty slice.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(size))
    else {
        return &[];
    };
    if size == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// `ceil(total / size)`, or `0` when `size` is `0`.
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}

/// Up to `window` consecutive page numbers centred on `current`, clamped
/// to `1..=total`. Always yields `min(window, total)` numbers.
pub fn windowed_page_numbers(current: usize, total: usize, window: usize) -> Vec<usize> {
    if total == 0 || window == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let start = current.saturating_sub(window / 2).max(1);
    let end = start.saturating_add(window - 1).min(total);
    let start = end.saturating_sub(window - 1).max(1);
    (start..=end).collect()
}

/// Page cursor over a list of `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub current: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub window: usize,
}

impl Pager {
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            current: 1,
            page_size,
            total_items,
            window: DEFAULT_PAGE_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Advance one page. Returns `false` on the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped to `1..=total_pages` (or `1` when empty).
    pub fn goto(&mut self, page: usize) -> usize {
        self.current = page.clamp(1, self.total_pages().max(1));
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Update the item count, pulling the cursor back in range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.goto(self.current);
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        windowed_page_numbers(self.current, self.total_pages(), self.window)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.current, self.page_size)
    }
}
