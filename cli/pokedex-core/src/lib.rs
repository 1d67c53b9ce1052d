//! Shared state primitives for the Pokédex workspace: durable favorites
//! storage and the pure derived-view pipeline.

pub mod favorites;
pub mod view;

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("file stored in an invalid location: {0}")]
    InvalidLocation(PathBuf),
    #[error("failed to open temporary file")]
    OpenTmpFile(#[source] std::io::Error),
    #[error("failed to rename temporary file")]
    RenameTmpFile(#[source] tempfile::PersistError),
    #[error("failed to write temporary file")]
    WriteTmpFile(#[source] serde_json::Error),
}

/// Serialize a value as JSON and write it to disk atomically.
///
/// The value is written to a temporary file in the same directory and then
/// renamed over `path`, so readers never observe a half-written file.
/// `path` must have a parent directory. There is no cross-process locking:
/// the stores in this workspace have a single writer per profile.
pub fn serialize_atomically<T>(value: &T, path: &impl AsRef<Path>) -> Result<(), SerializeError>
where
    T: ?Sized + Serialize,
{
    let parent = path
        .as_ref()
        .parent()
        .ok_or_else(|| SerializeError::InvalidLocation(path.as_ref().to_path_buf()))?;
    let temp_file = tempfile::NamedTempFile::new_in(parent).map_err(SerializeError::OpenTmpFile)?;

    let writer = BufWriter::new(&temp_file);
    serde_json::to_writer(writer, value).map_err(SerializeError::WriteTmpFile)?;
    temp_file
        .persist(path.as_ref())
        .map_err(SerializeError::RenameTmpFile)?;
    Ok(())
}

/// Returns a `tracing`-compatible form of a [Path]
pub fn traceable_path(p: impl AsRef<Path>) -> impl tracing::Value {
    let path = p.as_ref();
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn atomic_write_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        serialize_atomically(&vec![1, 2, 3], &path).unwrap();
        serialize_atomically(&vec![4], &path).unwrap();

        let read: Vec<u32> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, vec![4]);
    }

    #[test]
    fn rootless_path_is_rejected() {
        let result = serialize_atomically(&42, &PathBuf::from("/"));
        assert!(matches!(result, Err(SerializeError::InvalidLocation(_))));
    }
}
