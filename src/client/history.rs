use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};
use uuid::Uuid;

/// Storage key the history list is kept under.
pub const HISTORY_KEY: &str = "translation-history";
/// Maximum number of retained entries.
pub const HISTORY_LIMIT: usize = 25;

/// Entry identifier. New entries get a UUID; lists written by the browser
/// client carry millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(id) => f.write_str(id),
            Self::Number(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: EntryId,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    pub fn new(source_text: &str, translated_text: &str, source_lang: &str, target_lang: &str) -> Self {
        Self {
            id: EntryId::Text(Uuid::new_v4().to_string()),
            source_text: source_text.to_string(),
            translated_text: translated_text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

/// Key/value string store backed by one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Most-recent-first list of successful translations, capped at
/// [`HISTORY_LIMIT`].
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Load the persisted list. Missing or unreadable data yields an empty
    /// list; malformed entries are skipped one by one.
    pub fn load(storage: &LocalStorage) -> Self {
        let Some(raw) = storage.get_item(HISTORY_KEY) else {
            return Self::default();
        };

        let items = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("Discarding unreadable history: {}", e);
                return Self::default();
            }
        };

        let mut entries: Vec<HistoryEntry> = items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping malformed history entry: {}", e);
                    None
                }
            })
            .collect();
        entries.truncate(HISTORY_LIMIT);
        debug!("Loaded {} history entries", entries.len());
        Self { entries }
    }

    pub fn save(&self, storage: &LocalStorage) -> Result<()> {
        storage.set_item(HISTORY_KEY, &serde_json::to_string_pretty(&self.entries)?)
    }

    /// Insert at the front, evicting the oldest entries past the cap.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
