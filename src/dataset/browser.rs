//! Explorer driver: runs the select, fetch and apply cycle against a source.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::models::{DatasetKind, PageSize};
use super::source::DatasetSource;
use super::state::{BrowserState, BrowserView};

/// Owns one [`BrowserState`] and the source it is filled from.
///
/// The lock is never held across the network call; overlapping kind switches
/// are resolved by the request ticket inside the state.
pub struct DatasetBrowser {
    source: Arc<dyn DatasetSource>,
    state: Arc<Mutex<BrowserState>>,
}

impl DatasetBrowser {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(BrowserState::default())),
        }
    }

    /// Switch to `kind` and load it.
    ///
    /// The fetch runs on its own task and always applies its result, so a
    /// caller that stops waiting cannot leave the browser loading.
    pub async fn select_dataset_kind(&self, kind: DatasetKind) -> BrowserView {
        let ticket = {
            let mut state = self.state.lock().await;
            let (next, ticket) = std::mem::take(&mut *state).select_dataset_kind(kind);
            *state = next;
            ticket
        };

        let source = self.source.clone();
        let state = self.state.clone();
        let fetch = tokio::spawn(async move {
            let result = source.fetch(kind).await;
            let mut state = state.lock().await;
            *state = std::mem::take(&mut *state).apply_fetch(ticket, result);
            state.view()
        });

        match fetch.await {
            Ok(view) => view,
            Err(e) => {
                tracing::error!(%kind, error = %e, "dataset fetch task failed");
                self.view().await
            }
        }
    }

    pub async fn set_page_size(&self, page_size: PageSize) -> BrowserView {
        self.update(|state| state.set_page_size(page_size)).await
    }

    pub async fn next_page(&self) -> BrowserView {
        self.update(BrowserState::next_page).await
    }

    pub async fn previous_page(&self) -> BrowserView {
        self.update(BrowserState::previous_page).await
    }

    pub async fn view(&self) -> BrowserView {
        self.state.lock().await.view()
    }

    /// CSV of every loaded row along with the dataset it came from.
    pub async fn export(&self) -> Option<(DatasetKind, String)> {
        let state = self.state.lock().await;
        state.export_csv().map(|csv| (state.kind(), csv))
    }

    async fn update<F>(&self, f: F) -> BrowserView
    where
        F: FnOnce(BrowserState) -> BrowserState,
    {
        let mut state = self.state.lock().await;
        *state = f(std::mem::take(&mut *state));
        state.view()
    }
}
