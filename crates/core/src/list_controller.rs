//! Pagination and filter state for one list panel.
//!
//! The controller does no I/O. Every state change hands back a
//! [`FetchRequest`] stamped with a generation number; the caller performs the
//! fetch and reports the result with [`ListController::complete`]. Results
//! for anything but the latest generation are discarded, so completion order
//! never matters.
//!
//! ```text
//! Idle ──change──▶ Loading ──ok──▶ Ready
//!                     │  ▲           │
//!                   fail └──change───┤
//!                     ▼              │
//!                   Error ──change───┘
//! ```

use crate::error::CoreError;
use crate::filters::FilterSet;
use crate::paging::{total_pages, CollectionPage, PageRequest};
use crate::resource::{check_filter, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// What to fetch, and the generation to report back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub filters: FilterSet,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued; the result was dropped.
    Stale,
}

pub struct ListController<R: Resource> {
    filters: FilterSet,
    page: u32,
    page_size: u32,
    items: Vec<R::Item>,
    total: u64,
    status: ListStatus,
    error: Option<String>,
    generation: u64,
}

impl<R: Resource> Default for ListController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListController<R> {
    pub fn new() -> Self {
        Self {
            filters: FilterSet::new(),
            page: 1,
            page_size: R::DEFAULT_PAGE_SIZE,
            items: Vec::new(),
            total: 0,
            status: ListStatus::Idle,
            error: None,
            generation: 0,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    // -- transitions --------------------------------------------------------

    /// Set one filter and go back to page 1. An empty value clears it.
    pub fn set_filter(&mut self, name: &str, value: &str) -> Result<FetchRequest, CoreError> {
        check_filter::<R>(name)?;
        self.filters.set(name, value);
        self.page = 1;
        self.begin()
    }

    /// Replace the whole filter set and go back to page 1.
    pub fn apply_filters(&mut self, filters: FilterSet) -> Result<FetchRequest, CoreError> {
        for name in filters.names() {
            check_filter::<R>(name)?;
        }
        self.filters = filters;
        self.page = 1;
        self.begin()
    }

    pub fn clear_filters(&mut self) -> Result<FetchRequest, CoreError> {
        self.filters.clear();
        self.page = 1;
        self.begin()
    }

    /// Move to another page; filters are kept.
    pub fn set_page(&mut self, page: u32) -> Result<FetchRequest, CoreError> {
        PageRequest::new(page, self.page_size)?;
        self.page = page;
        self.begin()
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if !self.has_next() {
            return None;
        }
        self.set_page(self.page + 1).ok()
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        if !self.has_previous() {
            return None;
        }
        self.set_page(self.page - 1).ok()
    }

    /// Change the page size and go back to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<FetchRequest, CoreError> {
        PageRequest::new(1, page_size)?;
        self.page_size = page_size;
        self.page = 1;
        self.begin()
    }

    /// Re-fetch with the current state.
    pub fn refresh(&mut self) -> Result<FetchRequest, CoreError> {
        self.begin()
    }

    /// Apply the outcome of a fetch. Items are replaced wholesale on success
    /// and kept as they were on failure.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<CollectionPage<R::Item>, String>,
    ) -> Completion {
        if generation != self.generation {
            tracing::debug!(
                resource = R::PLURAL,
                generation,
                latest = self.generation,
                "Discarding stale list response"
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.error = None;
                self.status = ListStatus::Ready;
            }
            Err(message) => {
                self.error = Some(message);
                self.status = ListStatus::Error;
            }
        }
        Completion::Applied
    }

    /// Drop a fetch that ended in session expiry. The controller stays where
    /// it is; neither items nor error change.
    pub fn abandon(&mut self, generation: u64) -> Completion {
        if generation == self.generation {
            Completion::Applied
        } else {
            Completion::Stale
        }
    }

    fn begin(&mut self) -> Result<FetchRequest, CoreError> {
        let page = PageRequest::new(self.page, self.page_size)?;
        self.generation += 1;
        self.status = ListStatus::Loading;
        tracing::debug!(
            resource = R::PLURAL,
            generation = self.generation,
            page = self.page,
            page_size = self.page_size,
            "List fetch requested"
        );
        Ok(FetchRequest {
            generation: self.generation,
            filters: self.filters.clone(),
            page,
        })
    }
}
