//! Browser state and its update functions.
//!
//! Every transition consumes the current state and returns the next one, so
//! the page bounds and the reset-on-switch rule live in one place.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ServiceError;
use crate::sequence::{Sequence, Ticket};

use super::export;
use super::models::{Dataset, DatasetKind, DatasetSlice, PageSize};

/// Table state for one explorer.
///
/// `page_index` is 1-based and always within `1..=total_pages()`.
#[derive(Debug, Clone)]
pub struct BrowserState {
    kind: DatasetKind,
    rows: Dataset,
    page_index: usize,
    page_size: PageSize,
    loading: bool,
    last_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    requests: Sequence,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            kind: DatasetKind::default(),
            rows: Dataset::default(),
            page_index: 1,
            page_size: PageSize::default(),
            loading: false,
            last_error: None,
            fetched_at: None,
            requests: Sequence::default(),
        }
    }
}

impl BrowserState {
    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn rows(&self) -> &Dataset {
        &self.rows
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Switch datasets: clear rows, go back to page 1 and start loading.
    ///
    /// The returned ticket must accompany the fetch result.
    pub fn select_dataset_kind(mut self, kind: DatasetKind) -> (Self, Ticket) {
        let ticket = self.requests.issue();
        self.kind = kind;
        self.rows = Dataset::empty(kind);
        self.page_index = 1;
        self.loading = true;
        self.last_error = None;
        self.fetched_at = None;
        (self, ticket)
    }

    /// Install the outcome of a fetch.
    ///
    /// Results carrying a superseded ticket are dropped unchanged. A failure
    /// leaves the rows empty.
    pub fn apply_fetch(mut self, ticket: Ticket, result: Result<Dataset, ServiceError>) -> Self {
        if !self.requests.is_current(ticket) {
            tracing::debug!(kind = %self.kind, "discarding stale dataset response");
            return self;
        }

        self.loading = false;
        self.page_index = 1;
        match result {
            Ok(rows) if rows.kind() == self.kind => {
                self.rows = rows;
                self.last_error = None;
                self.fetched_at = Some(Utc::now());
            }
            Ok(rows) => {
                tracing::warn!(expected = %self.kind, got = %rows.kind(), "dataset kind mismatch");
                self.rows = Dataset::empty(self.kind);
                self.last_error = Some(format!("expected {} rows, got {}", self.kind, rows.kind()));
            }
            Err(e) => {
                tracing::warn!(kind = %self.kind, error = %e, "dataset fetch failed");
                self.rows = Dataset::empty(self.kind);
                self.last_error = Some(e.to_string());
            }
        }
        self
    }

    /// Change rows per page and return to page 1.
    pub fn set_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self.page_index = 1;
        self
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(mut self) -> Self {
        self.page_index = (self.page_index + 1).min(self.total_pages());
        self
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(mut self) -> Self {
        self.page_index = self.page_index.saturating_sub(1).max(1);
        self
    }

    /// `ceil(rows / page_size)`, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size.get()).max(1)
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> DatasetSlice<'_> {
        let size = self.page_size.get();
        let start = (self.page_index - 1) * size;
        self.rows.slice(start..start + size)
    }

    pub fn unique_brand_count(&self) -> usize {
        self.rows.unique_brand_count()
    }

    /// CSV for every loaded row, or `None` when nothing is loaded.
    pub fn export_csv(&self) -> Option<String> {
        export::to_csv(&self.rows)
    }

    /// Owned snapshot for rendering.
    pub fn view(&self) -> BrowserView {
        BrowserView {
            kind: self.kind,
            dataset_type: self.kind.label(),
            loading: self.loading,
            error: self.last_error.clone(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_pages: self.total_pages(),
            records_loaded: self.rows.len(),
            unique_brands: self.unique_brand_count(),
            fetched_at: self.fetched_at,
            rows: self.visible_rows().to_dataset(),
        }
    }
}

/// What the explorer table renders.
#[derive(Debug, Clone, Serialize)]
pub struct BrowserView {
    pub kind: DatasetKind,
    pub dataset_type: &'static str,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub page_index: usize,
    pub page_size: PageSize,
    pub total_pages: usize,
    pub records_loaded: usize,
    pub unique_brands: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    pub rows: Dataset,
}
