//! Pagination metadata, list-response normalization and the page widget
//!
//! Backend list endpoints answer either with a bare array or with an
//! `{items, pagination}` envelope. Both are normalized into [`ListPage`] at
//! the service boundary so views never branch on the response shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_CHOICES: [u32; 5] = [5, 10, 20, 50, 100];

/// Number of page buttons shown before ellipses kick in.
const MAX_PAGES_SHOWN: u32 = 5;

// ═══════════════════════════════════════════════════════════════════════════
// Metadata
// ═══════════════════════════════════════════════════════════════════════════

/// Pagination metadata attached to a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub pages: u32,
    pub total: u32,
    pub per_page: u32,
    pub has_prev: bool,
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u32>,
}

impl PageInfo {
    /// Metadata for `total` records split in pages of `per_page`.
    ///
    /// `pages` is `ceil(total / per_page)` (0 when there are no records),
    /// `has_prev == page > 1` and `has_next == page < pages`.
    pub fn compute(page: u32, per_page: u32, total: u32) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let pages = total.div_ceil(per_page);
        let has_prev = page > 1;
        let has_next = page < pages;

        Self {
            page,
            pages,
            total,
            per_page,
            has_prev,
            has_next,
            next_page: has_next.then_some(page + 1),
            prev_page: has_prev.then_some(page - 1),
        }
    }

    /// 1-based index of the first record on this page.
    ///
    /// Clamped to [`end_item`](Self::end_item) when the page lies past the end.
    pub fn start_item(&self) -> u32 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.per_page)
            .saturating_add(1)
            .min(self.end_item())
    }

    /// 1-based index of the last record on this page.
    pub fn end_item(&self) -> u32 {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// List responses
// ═══════════════════════════════════════════════════════════════════════════

/// Raw list payload as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged { items: Vec<T>, pagination: PageInfo },
    Bare(Vec<T>),
}

/// Normalized list payload.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub records: Vec<T>,
    pub pagination: Option<PageInfo>,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            pagination: None,
        }
    }
}

impl<T> From<ListResponse<T>> for ListPage<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Paged { items, pagination } => Self {
                records: items,
                pagination: Some(pagination),
            },
            ListResponse::Bare(records) => Self {
                records,
                pagination: None,
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Page widget
// ═══════════════════════════════════════════════════════════════════════════

/// One slot of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    Page(u32),
    /// Non-selectable gap marker
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page numbers to display for `current` out of `pages`.
pub fn page_numbers(current: u32, pages: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if pages <= MAX_PAGES_SHOWN {
        return (1..=pages).map(Page).collect();
    }

    if current <= 3 {
        let mut items: Vec<PageItem> = (1..=4).map(Page).collect();
        items.extend([Ellipsis, Page(pages)]);
        items
    } else if current >= pages - 2 {
        let mut items = vec![Page(1), Ellipsis];
        items.extend((pages - 3..=pages).map(Page));
        items
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(pages),
        ]
    }
}

/// Requested page (and optionally a new page size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page: u32,
    pub per_page: Option<u32>,
}

impl PageChange {
    pub fn to_page(page: u32) -> Self {
        Self {
            page,
            per_page: None,
        }
    }

    /// A page-size change always goes back to the first page.
    pub fn resize(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: Some(per_page),
        }
    }
}

/// Rendered state of the pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current: u32,
    pub pages: u32,
    pub start_item: u32,
    pub end_item: u32,
    pub total: u32,
    pub per_page: u32,
    pub items: Vec<PageItem>,
    pub first_enabled: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
}

impl PaginationView {
    /// `None` when there is nothing to paginate.
    pub fn render(info: &PageInfo) -> Option<Self> {
        if info.total == 0 {
            return None;
        }

        Some(Self {
            current: info.page,
            pages: info.pages,
            start_item: info.start_item(),
            end_item: info.end_item(),
            total: info.total,
            per_page: info.per_page,
            items: page_numbers(info.page, info.pages),
            first_enabled: info.has_prev,
            prev_enabled: info.has_prev,
            next_enabled: info.has_next,
            last_enabled: info.has_next,
        })
    }

    pub fn first(&self) -> Option<PageChange> {
        self.first_enabled.then(|| PageChange::to_page(1))
    }

    pub fn prev(&self) -> Option<PageChange> {
        self.prev_enabled
            .then(|| PageChange::to_page(self.current.saturating_sub(1)))
    }

    pub fn next(&self) -> Option<PageChange> {
        self.next_enabled
            .then(|| PageChange::to_page(self.current.saturating_add(1)))
    }

    pub fn last(&self) -> Option<PageChange> {
        self.last_enabled.then(|| PageChange::to_page(self.pages))
    }

    /// Clicking a slot; ellipses do nothing.
    pub fn select(&self, item: PageItem) -> Option<PageChange> {
        match item {
            PageItem::Page(n) => Some(PageChange::to_page(n)),
            PageItem::Ellipsis => None,
        }
    }

    /// Choosing a page size from [`PAGE_SIZE_CHOICES`].
    pub fn select_page_size(&self, per_page: u32) -> Option<PageChange> {
        PAGE_SIZE_CHOICES
            .contains(&per_page)
            .then(|| PageChange::resize(per_page))
    }
}

impl fmt::Display for PaginationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strip: Vec<String> = self
            .items
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == self.current => format!("[{n}]"),
                other => other.to_string(),
            })
            .collect();

        let arrow = |enabled: bool, symbol: &'static str| if enabled { symbol } else { " " };

        write!(
            f,
            "Showing {} to {} of {} results  {}{} {} {}{}  ({} per page)",
            self.start_item,
            self.end_item,
            self.total,
            arrow(self.first_enabled, "«"),
            arrow(self.prev_enabled, "‹"),
            strip.join(" "),
            arrow(self.next_enabled, "›"),
            arrow(self.last_enabled, "»"),
            self.per_page,
        )
    }
}
