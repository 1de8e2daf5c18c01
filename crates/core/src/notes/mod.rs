//! Notes module - free-text notes per symbol, persisted to a JSON file.

mod notes_model;
mod notes_store;
mod notes_traits;

pub use notes_model::{Note, NoteUpdate};
pub use notes_store::FileNotesStore;
pub use notes_traits::NotesStore;
