use super::notes_model::Note;
use crate::errors::Result;

/// Keyed storage for per-symbol notes.
pub trait NotesStore: Send + Sync {
    /// All notes, ordered by symbol.
    fn list_notes(&self) -> Result<Vec<Note>>;

    fn get_note(&self, symbol: &str) -> Result<Option<Note>>;

    /// Inserts or replaces the note for a symbol.
    fn save_note(&self, symbol: &str, text: &str) -> Result<Note>;

    /// Removes the note for a symbol. Fails with `NotFound` if there is none.
    fn delete_note(&self, symbol: &str) -> Result<Note>;
}
