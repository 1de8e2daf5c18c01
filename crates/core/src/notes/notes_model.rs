//! Notes domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub symbol: String,
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

/// Input model for saving a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub text: String,
}
