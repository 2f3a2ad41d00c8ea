//! Campaigns

use chrono::DateTime;
use chrono::Utc;

/// Longest campaign name the `campaigns.name` column accepts, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// An RPG campaign, owner of zero or more notes
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Campaign {
    /// Campaign ID
    pub id: i64,

    /// Display name, not unique
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Creation date
    pub created_at: DateTime<Utc>,
}
