// ── Grid browser ──
//
// State machine behind the paginated grid: a browse query (page, search
// term, favorites toggle) and the page view it produces. The previous
// page stays visible as a placeholder while the next one loads, and a
// load whose query changed mid-flight is discarded.

use std::sync::Arc;

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::filter::ItemFilter;
use crate::model::{ItemDetail, ItemId};
use crate::pagination::{page_count, paginate, windowed_page_numbers};

/// What the grid is asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseQuery {
    /// 1-indexed.
    pub page: usize,
    pub search: String,
    pub favorites_only: bool,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            favorites_only: false,
        }
    }
}

impl BrowseQuery {
    pub fn filter(&self) -> ItemFilter {
        ItemFilter {
            search: self.search.clone(),
            favorites_only: self.favorites_only,
        }
    }

    fn same_filter(&self, other: &Self) -> bool {
        self.search == other.search && self.favorites_only == other.favorites_only
    }
}

/// One card in the grid.
#[derive(Debug, Clone, Serialize)]
pub struct GridItem {
    pub detail: Arc<ItemDetail>,
    pub favorite: bool,
}

/// A fully loaded grid page.
#[derive(Debug, Clone, Serialize)]
pub struct GridPage {
    pub query: BrowseQuery,
    pub items: Vec<GridItem>,
    /// Items matching the filter across all pages.
    pub total_filtered: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<usize>,
}

impl GridPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.query.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.query.page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Observable view state.
#[derive(Debug, Clone)]
pub struct PageState {
    pub status: LoadStatus,
    /// Last loaded page, possibly for an older query.
    pub page: Option<Arc<GridPage>>,
    /// `page` belongs to an earlier query and is shown until the current
    /// one settles.
    pub is_placeholder: bool,
    pub error: Option<CoreError>,
    /// Query the current status refers to.
    pub query: BrowseQuery,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            page: None,
            is_placeholder: false,
            error: None,
            query: BrowseQuery::default(),
        }
    }
}

/// Result of [`Browser::load`].
#[derive(Debug, Clone)]
pub enum PageLoad {
    Ready(Arc<GridPage>),
    /// The query changed while loading; the result was dropped.
    Superseded,
}

pub struct Browser {
    catalog: Catalog,
    page_size: usize,
    page_window: usize,
    query: watch::Sender<BrowseQuery>,
    state: watch::Sender<PageState>,
}

impl Browser {
    pub fn new(catalog: Catalog) -> Self {
        let page_size = catalog.config().page_size;
        let page_window = catalog.config().page_window;
        Self {
            catalog,
            page_size,
            page_window,
            query: watch::Sender::new(BrowseQuery::default()),
            state: watch::Sender::new(PageState::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> BrowseQuery {
        self.query.borrow().clone()
    }

    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.subscribe()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<BrowseQuery> {
        self.query.subscribe()
    }

    // ── Query changes ────────────────────────────────────────────────

    /// Change the search term; resets to page 1 if it differs.
    pub fn set_search(&self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.query.send_if_modified(|q| {
            if q.search == term {
                return false;
            }
            q.search = term;
            q.page = 1;
            true
        })
    }

    /// Show only favorites (or everything); resets to page 1 if it differs.
    pub fn set_favorites_only(&self, on: bool) -> bool {
        self.query.send_if_modified(|q| {
            if q.favorites_only == on {
                return false;
            }
            q.favorites_only = on;
            q.page = 1;
            true
        })
    }

    /// Flip the favorites-only toggle and return its new value.
    pub fn toggle_favorites_only(&self) -> bool {
        let on = !self.query.borrow().favorites_only;
        self.set_favorites_only(on);
        on
    }

    /// Jump to `page`, clamped to the page count known for the current
    /// filter. Returns the page actually selected.
    pub fn goto_page(&self, page: usize) -> usize {
        let known_pages = self.known_total_pages();
        let mut selected = page.max(1);
        self.query.send_if_modified(|q| {
            if let Some(total) = known_pages {
                selected = selected.min(total.max(1));
            }
            if q.page == selected {
                return false;
            }
            q.page = selected;
            true
        });
        selected
    }

    /// Advance one page if the last loaded page says there is one.
    pub fn next_page(&self) -> bool {
        let Some(total) = self.known_total_pages() else {
            return false;
        };
        self.query.send_if_modified(|q| {
            if q.page >= total {
                return false;
            }
            q.page += 1;
            true
        })
    }

    pub fn prev_page(&self) -> bool {
        self.query.send_if_modified(|q| {
            if q.page <= 1 {
                return false;
            }
            q.page -= 1;
            true
        })
    }

    /// Flip an item's favorite flag through the catalog's store.
    pub fn toggle_favorite(&self, id: ItemId) -> Result<bool, CoreError> {
        self.catalog.favorites().toggle(id)
    }

    /// Page count from the last loaded page, if it used the current filter.
    fn known_total_pages(&self) -> Option<usize> {
        let query = self.query.borrow().clone();
        let state = self.state.borrow();
        state
            .page
            .as_ref()
            .filter(|p| p.query.same_filter(&query))
            .map(|p| p.total_pages)
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Load the page for the current query.
    ///
    /// The previous page remains in [`PageState::page`] with
    /// `is_placeholder` set until this load settles. If the query changes
    /// before it does, the result is discarded and `Superseded` returned.
    pub async fn load(&self) -> Result<PageLoad, CoreError> {
        let query = self.query();
        self.state.send_modify(|s| {
            s.status = LoadStatus::Loading;
            s.is_placeholder = s.page.is_some();
            s.error = None;
            s.query = query.clone();
        });

        let result = self.build_page(&query).await;

        if *self.query.borrow() != query {
            debug!(?query, "discarding superseded page load");
            return Ok(PageLoad::Superseded);
        }

        match result {
            Ok(page) => {
                let page = Arc::new(page);
                self.state.send_replace(PageState {
                    status: LoadStatus::Ready,
                    page: Some(Arc::clone(&page)),
                    is_placeholder: false,
                    error: None,
                    query,
                });
                Ok(PageLoad::Ready(page))
            }
            Err(error) => {
                self.state.send_modify(|s| {
                    s.status = LoadStatus::Failed;
                    s.error = Some(error.clone());
                });
                Err(error)
            }
        }
    }

    async fn build_page(&self, query: &BrowseQuery) -> Result<GridPage, CoreError> {
        let all = self.catalog.all_items().await?;
        let favorites = self.catalog.favorites().snapshot();

        let filtered = query.filter().apply(&all, &favorites);
        let total_pages = page_count(filtered.len(), self.page_size);
        let slice = paginate(&filtered, query.page, self.page_size);
        debug!(
            page = query.page,
            total_filtered = filtered.len(),
            on_page = slice.len(),
            "building grid page"
        );

        let details = self.catalog.page_details(slice).await?;
        let items = details
            .into_iter()
            .map(|detail| GridItem {
                favorite: favorites.contains(&detail.id),
                detail,
            })
            .collect();

        Ok(GridPage {
            query: query.clone(),
            items,
            total_filtered: filtered.len(),
            total_pages,
            page_numbers: windowed_page_numbers(query.page, total_pages, self.page_window),
        })
    }
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("query", &*self.query.borrow())
            .field("status", &self.state.borrow().status)
            .finish_non_exhaustive()
    }
}
