//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::campaigns::Campaign;
use crate::campaigns::MAX_NAME_LENGTH;
use crate::notes::MAX_TITLE_LENGTH;
use crate::notes::Note;

use super::CreateCampaignValues;
use super::CreateNoteValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateCampaignValues;
use super::UpdateNoteValues;

/// All rows, guarded together so every operation sees and leaves a consistent state
#[derive(Debug, Default)]
struct Tables {
    /// Campaigns by ID
    campaigns: BTreeMap<i64, Campaign>,

    /// Notes by ID, `campaign_name` is filled in on the way out
    notes: BTreeMap<i64, Note>,

    /// Last handed out campaign ID
    last_campaign_id: i64,

    /// Last handed out note ID
    last_note_id: i64,
}

impl Tables {
    /// Note with the current name of its campaign
    fn joined(&self, note: &Note) -> Option<Note> {
        self.campaigns.get(&note.campaign_id).map(|campaign| Note {
            campaign_name: campaign.name.clone(),
            ..note.clone()
        })
    }
}

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    tables: Arc<Mutex<Tables>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirror the length limits of the Postgres columns
fn check_length(column: &str, value: &str, max_length: usize) -> Result<()> {
    if value.chars().count() > max_length {
        return Err(Error::Integrity(format!(
            "value too long for column \"{column}\" (max {max_length} characters)"
        )));
    }

    Ok(())
}

#[async_trait]
impl Storage for Memory {
    async fn find_all_campaigns(&self) -> Result<Vec<Campaign>> {
        Ok(self
            .tables
            .lock()
            .await
            .campaigns
            .values()
            .cloned()
            .collect())
    }

    async fn find_single_campaign_by_id(&self, id: i64) -> Result<Option<Campaign>> {
        Ok(self.tables.lock().await.campaigns.get(&id).cloned())
    }

    async fn find_single_campaign_by_name(&self, name: &str) -> Result<Option<Campaign>> {
        Ok(self
            .tables
            .lock()
            .await
            .campaigns
            .values()
            .find(|campaign| campaign.name == name)
            .cloned())
    }

    async fn create_campaign(&self, values: &CreateCampaignValues<'_>) -> Result<Campaign> {
        check_length("name", values.name, MAX_NAME_LENGTH)?;

        let mut tables = self.tables.lock().await;

        tables.last_campaign_id += 1;

        let campaign = Campaign {
            id: tables.last_campaign_id,
            name: values.name.to_string(),
            description: values.description.map(ToString::to_string),
            created_at: Utc::now(),
        };

        tables.campaigns.insert(campaign.id, campaign.clone());

        Ok(campaign)
    }

    async fn update_campaign(
        &self,
        campaign: &Campaign,
        values: &UpdateCampaignValues<'_>,
    ) -> Result<Campaign> {
        if let Some(name) = values.name {
            check_length("name", name, MAX_NAME_LENGTH)?;
        }

        let mut tables = self.tables.lock().await;

        let campaign = tables
            .campaigns
            .get_mut(&campaign.id)
            .ok_or(Error::NotFound)?;

        if let Some(name) = values.name {
            campaign.name = name.to_string();
        }

        if let Some(description) = values.description {
            campaign.description = Some(description.to_string());
        }

        Ok(campaign.clone())
    }

    async fn delete_campaign(&self, campaign: &Campaign) -> Result<()> {
        let mut tables = self.tables.lock().await;

        tables
            .campaigns
            .remove(&campaign.id)
            .ok_or(Error::NotFound)?;

        tables
            .notes
            .retain(|_, note| note.campaign_id != campaign.id);

        Ok(())
    }

    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        let tables = self.tables.lock().await;

        Ok(tables
            .notes
            .values()
            .filter_map(|note| tables.joined(note))
            .collect())
    }

    async fn find_all_notes_by_campaign(&self, campaign: &Campaign) -> Result<Vec<Note>> {
        let tables = self.tables.lock().await;

        Ok(tables
            .notes
            .values()
            .filter(|note| note.campaign_id == campaign.id)
            .filter_map(|note| tables.joined(note))
            .collect())
    }

    async fn find_single_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        let tables = self.tables.lock().await;

        Ok(tables.notes.get(&id).and_then(|note| tables.joined(note)))
    }

    async fn create_note(
        &self,
        campaign: &Campaign,
        values: &CreateNoteValues<'_>,
    ) -> Result<Note> {
        if let Some(title) = values.title {
            check_length("title", title, MAX_TITLE_LENGTH)?;
        }

        let mut tables = self.tables.lock().await;

        let campaign_name = tables
            .campaigns
            .get(&campaign.id)
            .map(|stored| stored.name.clone())
            .ok_or_else(|| {
                Error::Integrity(format!(
                    "campaign {} does not exist, violates foreign key constraint",
                    campaign.id
                ))
            })?;

        tables.last_note_id += 1;

        let now = Utc::now();
        let note = Note {
            id: tables.last_note_id,
            campaign_id: campaign.id,
            campaign_name,
            title: values.title.map(ToString::to_string),
            content: values.content.to_string(),
            created_at: now,
            updated_at: now,
        };

        tables.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update_note(&self, note: &Note, values: &UpdateNoteValues<'_>) -> Result<Note> {
        if let Some(title) = values.title {
            check_length("title", title, MAX_TITLE_LENGTH)?;
        }

        let mut tables = self.tables.lock().await;

        let stored = tables.notes.get_mut(&note.id).ok_or(Error::NotFound)?;

        if let Some(title) = values.title {
            stored.title = Some(title.to_string());
        }

        if let Some(content) = values.content {
            stored.content = content.to_string();
        }

        stored.updated_at = Utc::now();

        let stored = stored.clone();

        tables.joined(&stored).ok_or(Error::NotFound)
    }

    async fn delete_note(&self, note: &Note) -> Result<()> {
        self.tables
            .lock()
            .await
            .notes
            .remove(&note.id)
            .ok_or(Error::NotFound)?;

        Ok(())
    }
}
