use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::notes_model::Note;
use super::notes_traits::NotesStore;
use crate::errors::{Error, Result};
use crate::holdings::normalize_symbol;

const CURRENT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct StoredNote {
    text: String,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct NotesFile {
    version: u32,
    notes: BTreeMap<String, StoredNote>,
}

/// Notes kept in a single JSON file.
///
/// Every write reads the whole file, changes one key and rewrites it, so a
/// reload always shows every note saved so far. A missing file is an empty
/// store.
#[derive(Debug)]
pub struct FileNotesStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileNotesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_store<F, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut BTreeMap<String, StoredNote>) -> Result<T>,
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Notes("Notes store lock poisoned".into()))?;
        let mut store = self.load_store_locked()?;
        let result = op(&mut store)?;
        self.persist_store_locked(&store)?;
        Ok(result)
    }

    fn read_store(&self) -> Result<BTreeMap<String, StoredNote>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Notes("Notes store lock poisoned".into()))?;
        self.load_store_locked()
    }

    fn load_store_locked(&self) -> Result<BTreeMap<String, StoredNote>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        let file: NotesFile = serde_json::from_slice(&raw)?;
        if file.version > CURRENT_VERSION {
            return Err(Error::Notes(format!(
                "Unsupported notes file version {} in {}",
                file.version,
                self.path.display()
            )));
        }
        Ok(file.notes)
    }

    fn persist_store_locked(&self, store: &BTreeMap<String, StoredNote>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = NotesFile {
            version: CURRENT_VERSION,
            notes: store.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        debug!("Wrote {} notes to {}", store.len(), self.path.display());
        Ok(())
    }
}

fn to_note(symbol: &str, stored: StoredNote) -> Note {
    Note {
        symbol: symbol.to_string(),
        text: stored.text,
        updated_at: stored.updated_at,
    }
}

impl NotesStore for FileNotesStore {
    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self
            .read_store()?
            .into_iter()
            .map(|(symbol, stored)| to_note(&symbol, stored))
            .collect())
    }

    fn get_note(&self, symbol: &str) -> Result<Option<Note>> {
        let symbol = normalize_symbol(symbol)?;
        Ok(self
            .read_store()?
            .remove(&symbol)
            .map(|stored| to_note(&symbol, stored)))
    }

    fn save_note(&self, symbol: &str, text: &str) -> Result<Note> {
        let symbol = normalize_symbol(symbol)?;
        let stored = StoredNote {
            text: text.to_string(),
            updated_at: Utc::now(),
        };
        self.with_store(|store| {
            store.insert(symbol.clone(), stored.clone());
            Ok(())
        })?;
        Ok(to_note(&symbol, stored))
    }

    fn delete_note(&self, symbol: &str) -> Result<Note> {
        let symbol = normalize_symbol(symbol)?;
        let stored = self.with_store(|store| {
            store
                .remove(&symbol)
                .ok_or_else(|| Error::NotFound(format!("Note for {}", symbol)))
        })?;
        Ok(to_note(&symbol, stored))
    }
}
