//! Saving and loading the editor document under its storage key.

use thiserror::Error;

use crate::document::{ContentState, ConvertError, RawDraftContentState, convert_from_raw, convert_to_raw};

use super::{Storage, StorageError};

/// Storage key holding the serialized document.
pub const EDITOR_CONTENT_KEY: &str = "editorContent";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored content is not a valid snapshot")]
    Json(#[from] serde_json::Error),

    #[error("stored content is inconsistent")]
    Convert(#[from] ConvertError),
}

/// Compact JSON of the raw form of `content`.
///
/// # Errors
///
/// Only fails if serialization itself fails.
pub fn serialize_snapshot(content: &ContentState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&convert_to_raw(content))
}

/// Parse a snapshot string back into content.
///
/// # Errors
///
/// Fails on malformed JSON or a snapshot that does not describe a valid
/// document.
pub fn parse_snapshot(json: &str) -> Result<ContentState, SnapshotError> {
    let raw: RawDraftContentState = serde_json::from_str(json)?;
    Ok(convert_from_raw(&raw)?)
}

/// Write `content` under [`EDITOR_CONTENT_KEY`], returning the JSON written.
///
/// # Errors
///
/// Fails when serialization or the storage write fails.
pub fn save_snapshot(storage: &mut dyn Storage, content: &ContentState) -> Result<String, SnapshotError> {
    let json = serialize_snapshot(content)?;
    storage.set_item(EDITOR_CONTENT_KEY, &json)?;
    tracing::debug!(bytes = json.len(), blocks = content.block_count(), "snapshot saved");
    Ok(json)
}

/// Read the stored document, `None` when nothing (or a blank value) was
/// saved.
///
/// # Errors
///
/// A stored value that cannot be read or parsed is an error; it is never
/// silently replaced by an empty document.
pub fn load_snapshot(storage: &dyn Storage) -> Result<Option<ContentState>, SnapshotError> {
    let Some(json) = storage
        .get_item(EDITOR_CONTENT_KEY)?
        .filter(|json| !json.trim().is_empty())
    else {
        tracing::debug!("no stored snapshot");
        return Ok(None);
    };
    let content = parse_snapshot(&json)?;
    tracing::debug!(blocks = content.block_count(), "snapshot loaded");
    Ok(Some(content))
}

/// Delete the stored document.
///
/// # Errors
///
/// Fails when the storage write fails.
pub fn clear_snapshot(storage: &mut dyn Storage) -> Result<(), SnapshotError> {
    storage.remove_item(EDITOR_CONTENT_KEY)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockType, InlineStyle, Position, SelectionState};
    use crate::storage::MemoryStorage;

    fn sample() -> ContentState {
        let content = ContentState::from_text("Title\nbody text");
        let key = content.first_block().key().clone();
        let caret = SelectionState::collapsed(Position::new(key.clone(), 0));
        let content = content.set_block_type(&caret, &BlockType::HeaderOne);
        let range = SelectionState::range(Position::new(key.clone(), 0), Position::new(key, 5));
        content.apply_inline_style(&range, &InlineStyle::Red)
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let mut storage = MemoryStorage::new();
        let json = save_snapshot(&mut storage, &sample()).unwrap();
        assert_eq!(storage.get_item(EDITOR_CONTENT_KEY).unwrap().as_deref(), Some(json.as_str()));

        let loaded = load_snapshot(&storage).unwrap().unwrap();
        assert_eq!(serialize_snapshot(&loaded).unwrap(), json);
    }

    #[test]
    fn test_saved_json_is_compact() {
        let json = serialize_snapshot(&sample()).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with("{\"blocks\":["));
        assert!(json.ends_with("\"entityMap\":{}}"));
    }

    #[test]
    fn test_load_without_snapshot_is_none() {
        let storage = MemoryStorage::new();
        assert!(load_snapshot(&storage).unwrap().is_none());
    }

    #[test]
    fn test_load_blank_value_is_none() {
        let mut storage = MemoryStorage::new();
        for blank in ["", "  \n"] {
            storage.set_item(EDITOR_CONTENT_KEY, blank).unwrap();
            assert!(load_snapshot(&storage).unwrap().is_none());
        }
    }

    #[test]
    fn test_load_malformed_json_is_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(EDITOR_CONTENT_KEY, "{not json").unwrap();
        assert!(matches!(load_snapshot(&storage), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_load_inconsistent_snapshot_is_error() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                EDITOR_CONTENT_KEY,
                r#"{"blocks":[{"key":"a","text":"x"},{"key":"a","text":"y"}],"entityMap":{}}"#,
            )
            .unwrap();
        assert!(matches!(load_snapshot(&storage), Err(SnapshotError::Convert(_))));
    }

    #[test]
    fn test_clear_removes_entry() {
        let mut storage = MemoryStorage::new();
        save_snapshot(&mut storage, &sample()).unwrap();
        clear_snapshot(&mut storage).unwrap();
        assert!(storage.is_empty());
        assert!(load_snapshot(&storage).unwrap().is_none());
    }
}
