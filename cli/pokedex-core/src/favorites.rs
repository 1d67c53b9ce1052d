//! Favorited entry ids, mirrored to a JSON file on disk.
//!
//! Persistence is best effort: the in-memory set is authoritative for the
//! session, and storage failures in either direction are logged but never
//! surfaced. Toggling always mutates memory first and then tries to persist.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{serialize_atomically, traceable_path};

/// File name of the favorites store inside the data directory.
pub const FAVORITES_FILE: &str = "favorites.json";

/// The set of favorited entry ids, backed by a JSON array on disk.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    ids: BTreeSet<u32>,
}

impl FavoritesStore {
    /// Read the favorites file at `path`.
    ///
    /// A missing or unparsable file yields the empty set; this is not an
    /// error the user ever sees.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match read_ids(&path) {
            Ok(Some(ids)) => ids,
            Ok(None) => {
                debug!(path = traceable_path(&path), "no favorites file yet");
                BTreeSet::new()
            },
            Err(err) => {
                warn!(
                    path = traceable_path(&path),
                    %err,
                    "failed to read favorites, starting with an empty set"
                );
                BTreeSet::new()
            },
        };
        Self { path, ids }
    }

    /// Flip membership of `id` and persist the result best-effort.
    ///
    /// Returns the new membership state.
    pub fn toggle(&mut self, id: u32) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };

        if let Err(err) = serialize_atomically(&self.ids, &self.path) {
            warn!(
                path = traceable_path(&self.path),
                %err,
                "failed to persist favorites, in-memory state kept"
            );
        }

        now_favorite
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &BTreeSet<u32> {
        &self.ids
    }
}

fn read_ids(path: &Path) -> Result<Option<BTreeSet<u32>>, anyhow::Error> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let parsed: BTreeSet<u32> = serde_json::from_str(&contents)?;
    Ok(Some(parsed))
}
