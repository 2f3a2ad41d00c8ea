use chrono::DateTime;
use chrono::Utc;

/// Longest note title the `notes.title` column accepts, in characters
pub const MAX_TITLE_LENGTH: usize = 150;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub campaign_id: i64,
    /// Joined from the owning campaign, never stored on the note itself
    pub campaign_name: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
