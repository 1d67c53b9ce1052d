//! Pure derivation of the visible, paginated entry set.
//!
//! Nothing here holds state: given the loaded collection and the current
//! filter values, [`visible_entries`] and [`paginate`] compute what a view
//! layer would render. Page-reset policy lives with the state container that
//! owns the filter, not here.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use pokedex_catalog::CatalogEntry;

/// How many entries a page shows by default.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(12).unwrap();

/// Type-tag filter; `All` disables type filtering entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Tag(String),
}

impl TypeFilter {
    /// Exact, case-sensitive match against the entry's canonical tags.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => entry.types.iter().any(|t| t == tag),
        }
    }
}

/// The current filter values, owned by the top-level state container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub search_term: String,
    pub type_filter: TypeFilter,
    pub favorites_only: bool,
    pub current_page: usize,
}

/// One page of the visible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub entries: Vec<&'a CatalogEntry>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_visible: usize,
}

/// Compute the visible subset of `entries`, preserving order.
///
/// Search (case-insensitive substring on the name) and type filtering apply
/// first; the favorites gate is a final, independent pass over their result.
pub fn visible_entries<'a>(
    entries: &'a [CatalogEntry],
    filter: &ViewFilter,
    favorites: &BTreeSet<u32>,
) -> Vec<&'a CatalogEntry> {
    let term = filter.search_term.to_lowercase();
    entries
        .iter()
        .filter(|entry| term.is_empty() || entry.name.to_lowercase().contains(&term))
        .filter(|entry| filter.type_filter.matches(entry))
        .filter(|entry| !filter.favorites_only || favorites.contains(&entry.id))
        .collect()
}

/// Slice the visible set down to the filter's current page.
///
/// `total_pages` is at least 1 even for an empty set. A current page past
/// the end yields an empty page rather than being clamped; navigation
/// actions are responsible for staying in bounds.
pub fn paginate<'a>(
    visible: &[&'a CatalogEntry],
    filter: &ViewFilter,
    page_size: NonZeroUsize,
) -> Page<'a> {
    let current_page = filter.current_page;
    let total_pages = visible.len().div_ceil(page_size.get()).max(1);
    let start = current_page.saturating_mul(page_size.get());
    let entries = visible
        .iter()
        .skip(start)
        .take(page_size.get())
        .copied()
        .collect();

    Page {
        entries,
        current_page,
        total_pages,
        total_visible: visible.len(),
    }
}
