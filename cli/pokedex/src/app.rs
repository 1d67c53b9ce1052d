//! Top-level application state container.
//!
//! All mutable UI state (collection, filter values, favorites, selection,
//! session) lives here behind one update entry point per field, and the
//! visible page is a pure derivation over it. The two page-reset paths are
//! independent: search/type/collection changes reset the page as filter
//! changes, while the favorites-view toggle resets it explicitly itself.

use std::num::NonZeroUsize;
use std::sync::Arc;

use pokedex_catalog::CatalogEntry;
use pokedex_core::favorites::FavoritesStore;
use pokedex_core::view::{self, Page, TypeFilter, ViewFilter};
use tracing::{error, warn};

use crate::auth::{AuthProvider, Session};
use crate::loader::CatalogSnapshot;

pub struct App {
    entries: Arc<Vec<CatalogEntry>>,
    loading: bool,
    load_error: Option<String>,
    filter: ViewFilter,
    favorites: FavoritesStore,
    page_size: NonZeroUsize,
    session: Option<Session>,
    selected: Option<u32>,
    notice: Option<String>,
}

impl App {
    pub fn new(favorites: FavoritesStore, page_size: NonZeroUsize) -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            loading: true,
            load_error: None,
            filter: ViewFilter::default(),
            favorites,
            page_size,
            session: None,
            selected: None,
            notice: None,
        }
    }

    // -----------------------------------------------------------------
    // Session gate
    // -----------------------------------------------------------------

    /// Apply a session change from the provider's stream.
    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Trigger an interactive sign-in.
    ///
    /// The session itself arrives through the provider's stream; a failure
    /// surfaces as a blocking notice for the view layer.
    pub async fn sign_in(&mut self, provider: &impl AuthProvider) -> bool {
        match provider.sign_in().await {
            Ok(_) => true,
            Err(err) => {
                error!(%err, "sign-in failed");
                self.notice = Some("Sign-in failed. Please try again.".to_string());
                false
            },
        }
    }

    /// End the session. Failure is logged only: the provider's stream stays
    /// the source of truth for whatever state remains.
    pub async fn sign_out(&mut self, provider: &impl AuthProvider) {
        if let Err(err) = provider.sign_out().await {
            warn!(%err, "sign-out failed");
        }
    }

    /// A pending user-facing notice, cleared by taking it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // -----------------------------------------------------------------
    // Collection updates
    // -----------------------------------------------------------------

    /// Apply the latest loader snapshot. A changed collection counts as a
    /// filter input change and resets the page; republishing the same
    /// content (the loader's final settle) leaves the page alone.
    pub fn apply_snapshot(&mut self, snapshot: &CatalogSnapshot) {
        let changed = !Arc::ptr_eq(&self.entries, &snapshot.entries)
            && *self.entries != *snapshot.entries;
        if changed {
            self.entries = Arc::clone(&snapshot.entries);
            self.filter.current_page = 0;
        }
        self.loading = snapshot.loading;
        self.load_error = snapshot.error.clone();
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // -----------------------------------------------------------------
    // Filter updates
    // -----------------------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
        self.filter.current_page = 0;
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.filter.type_filter = type_filter;
        self.filter.current_page = 0;
    }

    /// Toggle favorites-only mode. Resets the page via its own explicit
    /// path, not the filter-change one.
    pub fn toggle_favorites_view(&mut self) {
        self.filter.favorites_only = !self.filter.favorites_only;
        self.filter.current_page = 0;
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    // -----------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------

    /// Advance one page, clamped to the last page of the current view.
    pub fn next_page(&mut self) {
        let total_pages = self.page().total_pages;
        self.filter.current_page = (self.filter.current_page + 1).min(total_pages - 1);
    }

    /// Go back one page, clamped at the first.
    pub fn prev_page(&mut self) {
        self.filter.current_page = self.filter.current_page.saturating_sub(1);
    }

    // -----------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------

    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        self.favorites.toggle(id)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    // -----------------------------------------------------------------
    // Detail selection
    // -----------------------------------------------------------------

    /// Open the detail view for an entry, if it is in the collection.
    pub fn select_entry(&mut self, id: u32) {
        if self.entries.iter().any(|entry| entry.id == id) {
            self.selected = Some(id);
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        let id = self.selected?;
        self.entries.iter().find(|entry| entry.id == id)
    }

    // -----------------------------------------------------------------
    // Derived view
    // -----------------------------------------------------------------

    /// The current page of the visible set.
    pub fn page(&self) -> Page<'_> {
        let visible = view::visible_entries(&self.entries, &self.filter, self.favorites.ids());
        view::paginate(&visible, &self.filter, self.page_size)
    }
}
