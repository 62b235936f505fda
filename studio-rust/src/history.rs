//! The generation history log: most recent first, capped.

use crate::{config::DEFAULT_HISTORY_LIMIT, ContentType, GeneratedContent, HistoryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use uuid::Uuid;

/// File name used by [`FileHistoryStore::in_dir`].
pub const HISTORY_FILE_NAME: &str = "gix-content-history.json";

const PREVIEW_CHARS: usize = 100;

/// A successful generation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub prompt: String,
    pub content_type: ContentType,
    pub variations: Vec<GeneratedContent>,
    /// At most 100 characters.
    pub preview: String,
}

impl HistoryItem {
    pub fn new(
        prompt: impl Into<String>,
        content_type: ContentType,
        variations: Vec<GeneratedContent>,
    ) -> Self {
        let prompt = prompt.into();
        let preview = variations
            .first()
            .map(GeneratedContent::review_text)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| prompt.clone());
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            preview: truncate_chars(preview.trim(), PREVIEW_CHARS),
            prompt,
            content_type,
            variations,
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Persistence for the history log.
pub trait HistoryStore: Send + Sync {
    /// Insert `item` as the most recent entry, dropping entries past the cap.
    fn append(&self, item: HistoryItem) -> Result<(), HistoryError>;
    /// Entries, most recent first.
    fn list(&self) -> Result<Vec<HistoryItem>, HistoryError>;
    fn clear(&self) -> Result<(), HistoryError>;
}

fn push_capped(items: &mut Vec<HistoryItem>, item: HistoryItem, limit: usize) {
    items.insert(0, item);
    items.truncate(limit.max(1));
}

pub struct MemoryHistoryStore {
    items: Mutex<Vec<HistoryItem>>,
    limit: usize,
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl MemoryHistoryStore {
    pub fn new(limit: usize) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            limit,
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, item: HistoryItem) -> Result<(), HistoryError> {
        let mut items = self.items.lock().map_err(|_| HistoryError::Poisoned)?;
        push_capped(&mut items, item, self.limit);
        Ok(())
    }

    fn list(&self) -> Result<Vec<HistoryItem>, HistoryError> {
        Ok(self.items.lock().map_err(|_| HistoryError::Poisoned)?.clone())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.items.lock().map_err(|_| HistoryError::Poisoned)?.clear();
        Ok(())
    }
}

/// History kept as a JSON array in a single file. Unreadable content is
/// treated as an empty log.
pub struct FileHistoryStore {
    path: PathBuf,
    limit: usize,
    lock: Mutex<()>,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
            lock: Mutex::new(()),
        }
    }

    /// Store at `dir/gix-content-history.json`.
    pub fn in_dir(dir: impl AsRef<Path>, limit: usize) -> Self {
        Self::new(dir.as_ref().join(HISTORY_FILE_NAME), limit)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<HistoryItem>, HistoryError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };
        match serde_json::from_str(&data) {
            Ok(items) => Ok(items),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "ignoring unreadable history");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, items: &[HistoryItem]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec(items)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn append(&self, item: HistoryItem) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().map_err(|_| HistoryError::Poisoned)?;
        let mut items = self.read()?;
        push_capped(&mut items, item, self.limit);
        self.write(&items)
    }

    fn list(&self) -> Result<Vec<HistoryItem>, HistoryError> {
        let _guard = self.lock.lock().map_err(|_| HistoryError::Poisoned)?;
        self.read()
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().map_err(|_| HistoryError::Poisoned)?;
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}
