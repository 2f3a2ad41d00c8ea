//! All things related to the storage of campaigns and notes

use async_trait::async_trait;
use thiserror::Error;

use crate::campaigns::Campaign;
use crate::notes::Note;

pub use memory::Memory;
pub use postgres::Postgres;
pub use postgres::PostgresOptions;

mod memory;
mod postgres;

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A constraint of the storage was violated, nothing was written
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// The row targeted by a write no longer exists
    #[error("Row not found")]
    NotFound,

    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Campaign
pub struct CreateCampaignValues<'a> {
    /// Name of the campaign
    pub name: &'a str,

    /// Optional description
    pub description: Option<&'a str>,
}

/// Values to update a Campaign
///
/// Fields left at `None` keep their current value
pub struct UpdateCampaignValues<'a> {
    /// New name of the campaign
    pub name: Option<&'a str>,

    /// New description of the campaign
    pub description: Option<&'a str>,
}

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Optional title
    pub title: Option<&'a str>,

    /// Content of the note
    pub content: &'a str,
}

/// Values to update a Note
///
/// Fields left at `None` keep their current value, `updated_at` is always refreshed
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: Option<&'a str>,

    /// New content of the note
    pub content: Option<&'a str>,
}

/// Storage with all supported operations
///
/// Every write is atomic: it either fully applies or leaves the storage untouched
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find all campaigns, ordered by ID
    async fn find_all_campaigns(&self) -> Result<Vec<Campaign>>;

    /// Find a single campaign by ID
    async fn find_single_campaign_by_id(&self, id: i64) -> Result<Option<Campaign>>;

    /// Find a single campaign by name
    ///
    /// Names are not unique, the campaign with the lowest ID wins
    async fn find_single_campaign_by_name(&self, name: &str) -> Result<Option<Campaign>>;

    /// Create a campaign
    async fn create_campaign(&self, values: &CreateCampaignValues<'_>) -> Result<Campaign>;

    /// Update a campaign
    async fn update_campaign(
        &self,
        campaign: &Campaign,
        values: &UpdateCampaignValues<'_>,
    ) -> Result<Campaign>;

    /// Delete a campaign and all of its notes
    async fn delete_campaign(&self, campaign: &Campaign) -> Result<()>;

    /// Find all notes of all campaigns, ordered by ID
    async fn find_all_notes(&self) -> Result<Vec<Note>>;

    /// Find all notes of a campaign, ordered by ID
    async fn find_all_notes_by_campaign(&self, campaign: &Campaign) -> Result<Vec<Note>>;

    /// Find a single note by ID
    async fn find_single_note_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// Create a note for a campaign
    async fn create_note(&self, campaign: &Campaign, values: &CreateNoteValues<'_>)
    -> Result<Note>;

    /// Update a note
    async fn update_note(&self, note: &Note, values: &UpdateNoteValues<'_>) -> Result<Note>;

    /// Delete a note
    async fn delete_note(&self, note: &Note) -> Result<()>;
}
