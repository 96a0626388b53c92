//! Derived views over the blog cache: search, status filter, sort, paginate.
//!
//! Everything here is a pure function of the cache and a [`ViewState`].

use std::cmp::Ordering;

use serde::Serialize;

use crate::features::auth::permissions::RolePermission;
use crate::features::blogs::cache::{CollectionCache, Mirror};
use crate::features::blogs::models::{BlogRecord, BlogStatus};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::types::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BlogStatus),
}

impl StatusFilter {
    /// Parse a filter name case-insensitively; unknown names mean no filter
    pub fn parse(raw: &str) -> Self {
        BlogStatus::parse(raw).map_or(StatusFilter::All, StatusFilter::Only)
    }

    fn matches(&self, status: BlogStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Keep the collection order returned by the backend
    #[default]
    Default,
    TitleAsc,
    TitleDesc,
    ApprovedFirst,
    PendingFirst,
    Newest,
}

impl SortOption {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "title-asc" | "asc" | "a-z" => SortOption::TitleAsc,
            "title-desc" | "desc" | "z-a" => SortOption::TitleDesc,
            "approved-first" | "approved" => SortOption::ApprovedFirst,
            "pending-first" | "pending" => SortOption::PendingFirst,
            "newest" => SortOption::Newest,
            _ => SortOption::Default,
        }
    }
}

/// Case-folded title compare with the raw title as tie-breaker
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    pub tab: Mirror,
    pub search: String,
    pub status_filter: StatusFilter,
    pub sort: SortOption,
}

impl ViewQuery {
    fn matches(&self, record: &BlogRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        (needle.is_empty() || record.title.to_lowercase().contains(&needle))
            && self.status_filter.matches(record.status)
    }

    /// Filter and sort a mirror. Sorting is stable.
    pub fn apply<'a>(&self, records: Vec<&'a BlogRecord>) -> Vec<&'a BlogRecord> {
        let mut visible: Vec<&BlogRecord> = records.into_iter().filter(|r| self.matches(r)).collect();

        match self.sort {
            SortOption::Default => {}
            SortOption::TitleAsc => visible.sort_by(|a, b| compare_titles(&a.title, &b.title)),
            SortOption::TitleDesc => visible.sort_by(|a, b| compare_titles(&b.title, &a.title)),
            SortOption::ApprovedFirst => {
                visible.sort_by_key(|r| r.status != BlogStatus::Approved)
            }
            SortOption::PendingFirst => visible.sort_by_key(|r| r.status != BlogStatus::Pending),
            SortOption::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        visible
    }
}

/// Query plus the page currently requested.
///
/// Every query change sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    query: ViewQuery,
    page: i64,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ViewQuery::default(),
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn requested_page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_tab(&mut self, tab: Mirror) {
        self.query.tab = tab;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status_filter = filter;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.query.sort = sort;
        self.page = 1;
    }

    /// Request a page. Out-of-range values are clamped when projecting.
    pub fn set_page(&mut self, page: i64) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.max(1).saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}

/// Cut a page out of `items`, clamping the requested page into `[1, total_pages]`
pub fn paginate<T: Clone>(items: &[T], requested: i64, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = requested.clamp(1, total_pages as i64) as usize;

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start.min(end)..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Filtered and sorted records of the selected tab, before pagination
pub fn visible<'a>(cache: &'a CollectionCache, state: &ViewState) -> Vec<&'a BlogRecord> {
    state.query.apply(cache.mirror(state.query.tab))
}

/// The page of records currently on screen
pub fn project(cache: &CollectionCache, state: &ViewState) -> Page<BlogRecord> {
    let records: Vec<BlogRecord> = visible(cache, state).into_iter().cloned().collect();
    paginate(&records, state.page, state.page_size)
}

/// Pending blogs among the already-filtered visible set; empty for non-moderators
pub fn pending_for_role(
    cache: &CollectionCache,
    state: &ViewState,
    permission: &RolePermission,
) -> Vec<BlogRecord> {
    if !permission.is_moderator() {
        return Vec::new();
    }

    visible(cache, state)
        .into_iter()
        .filter(|r| r.status == BlogStatus::Pending)
        .cloned()
        .collect()
}

/// Per-status counts, handed to the charting collaborator as a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusSummary {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }

    pub fn series(&self) -> Vec<(BlogStatus, usize)> {
        vec![
            (BlogStatus::Pending, self.pending),
            (BlogStatus::Approved, self.approved),
            (BlogStatus::Rejected, self.rejected),
        ]
    }
}

pub fn status_summary<'a>(records: impl IntoIterator<Item = &'a BlogRecord>) -> StatusSummary {
    records
        .into_iter()
        .fold(StatusSummary::default(), |mut summary, record| {
            match record.status {
                BlogStatus::Pending => summary.pending += 1,
                BlogStatus::Approved => summary.approved += 1,
                BlogStatus::Rejected => summary.rejected += 1,
            }
            summary
        })
}
