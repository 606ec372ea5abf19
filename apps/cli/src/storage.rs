//! Deck file reading and writing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flashcard_core::{DeckData, DeckError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed deck file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid deck: {0}")]
    Deck(#[from] DeckError),

    #[error("no flashcards file has been opened")]
    NoSource,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a deck file.
pub fn load_deck_file(path: &Path) -> Result<DeckData, StorageError> {
    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    let data: DeckData = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), cards = data.flashcards.len(), "loaded deck file");
    Ok(data)
}

/// Write a deck file.
///
/// The data goes to a sibling temporary file first and is renamed over the
/// target, so an interrupted save never leaves a truncated deck behind.
pub fn save_deck_file(path: &Path, data: &DeckData) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let json = serde_json::to_string_pretty(data)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;

    tracing::info!(path = %path.display(), cards = data.flashcards.len(), "saved deck file");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use flashcard_core::Flashcard;
    use pretty_assertions::assert_eq;

    fn sample() -> DeckData {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let card = Flashcard::with_id("c1", "Q", "A", now);
        DeckData {
            last_seen: now,
            stack: vec!["c1".to_string()],
            flashcards: [("c1".to_string(), card)].into_iter().collect(),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deck.json");

        save_deck_file(&path, &sample()).unwrap();
        assert!(!temp_path(&path).exists());
        assert_eq!(load_deck_file(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_deck_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_deck_file(&path), Err(StorageError::Json(_))));
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("/data/deck.json")),
            PathBuf::from("/data/deck.json.tmp")
        );
    }
}
