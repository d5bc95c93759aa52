use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Coarse sentiment bucket derived from journal text by the mood classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "mood", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Neutral,
    Anxious,
    Down,
}

/// Reply persona the user picked for their study buddy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "tone", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Strict,
    Healer,
    Social,
}

impl Default for Tone {
    fn default() -> Self {
        Self::Healer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub mood: Mood,
    pub tone: Tone,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    pub content: String,
    pub tone: Option<Tone>,
}

#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    pub cursor: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct JournalPage {
    pub entries: Vec<JournalEntry>,
    pub next_cursor: Option<DateTime<Utc>>,
}
