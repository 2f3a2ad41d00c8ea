use axum::extract::State;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::notes::Note;
use crate::storage::CreateNoteValues;
use crate::storage::Error as StorageError;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;

use super::CampaignReference;
use super::Error;
use super::ErrorResponse;
use super::Form;
use super::MessageResponse;
use super::PathParameters;
use super::Success;
use super::campaigns::find_campaign;
use super::check_content;
use super::check_title;
use super::parse_content;

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteResponse {
    pub id: i64,
    pub campaign_id: i64,
    /// Current name of the campaign the note belongs to
    pub campaign_name: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteResponse {
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            campaign_id: note.campaign_id,
            campaign_name: note.campaign_name,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    pub fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect()
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    tag = "notes",
    responses(
        (status = 200, description = "All notes, ordered by ID", body = [NoteResponse]),
    ),
)]
pub async fn list<S: Storage>(
    State(storage): State<S>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let notes = storage.find_all_notes().await?;

    Ok(Success::ok(NoteResponse::from_note_multiple(notes)))
}

#[utoipa::path(
    get,
    path = "/notes/{note}",
    tag = "notes",
    params(("note" = i64, Path, description = "Note ID")),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
    ),
)]
pub async fn single<S: Storage>(
    State(storage): State<S>,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<NoteResponse>, Error> {
    get_note(&storage, note_id)
        .await
        .map(|note| Success::ok(NoteResponse::from_note(note)))
}

/// Form to create a note
///
/// The campaign is given by either `campaign_id` or `campaign_name`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteForm {
    campaign_id: Option<i64>,
    /// First campaign with this name
    campaign_name: Option<String>,
    /// At most 150 characters
    title: Option<String>,
    content: Option<String>,
}

#[utoipa::path(
    post,
    path = "/notes",
    tag = "notes",
    request_body = CreateNoteForm,
    responses(
        (status = 201, description = "The created note", body = NoteResponse),
        (status = 400, description = "Invalid note or unknown campaign", body = ErrorResponse),
    ),
)]
pub async fn create<S: Storage>(
    State(storage): State<S>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let reference = CampaignReference::from_fields(form.campaign_id, form.campaign_name)?;
    check_title(form.title.as_deref())?;
    let content = parse_content(form.content)?;

    // the campaign is part of the body, not the path, so a missing one is a bad request
    let campaign = find_campaign(&storage, &reference)
        .await?
        .ok_or_else(|| Error::bad_request("Campaign not found"))?;

    let values = CreateNoteValues {
        title: form.title.as_deref(),
        content: &content,
    };

    let note = storage.create_note(&campaign, &values).await?;

    tracing::debug!("Created note {} for campaign {}", note.id, campaign.id);

    Ok(Success::created(NoteResponse::from_note(note)))
}

/// Form to update a note, absent fields are left alone
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteForm {
    title: Option<String>,
    content: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/notes/{note}",
    tag = "notes",
    params(("note" = i64, Path, description = "Note ID")),
    request_body = UpdateNoteForm,
    responses(
        (status = 200, description = "The updated note", body = NoteResponse),
        (status = 400, description = "Invalid note", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
    ),
)]
pub async fn update<S: Storage>(
    State(storage): State<S>,
    PathParameters(note_id): PathParameters<i64>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    check_title(form.title.as_deref())?;
    if let Some(content) = &form.content {
        check_content(content)?;
    }

    let note = get_note(&storage, note_id).await?;

    let values = UpdateNoteValues {
        title: form.title.as_deref(),
        content: form.content.as_deref(),
    };

    let note = storage.update_note(&note, &values).await?;

    tracing::debug!("Updated note {}", note.id);

    Ok(Success::ok(NoteResponse::from_note(note)))
}

#[utoipa::path(
    delete,
    path = "/notes/{note}",
    tag = "notes",
    params(("note" = i64, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
    ),
)]
pub async fn delete<S: Storage>(
    State(storage): State<S>,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<MessageResponse>, Error> {
    let note = get_note(&storage, note_id).await?;

    match storage.delete_note(&note).await {
        Ok(()) => {}
        // gone since the lookup, e.g. a concurrent delete
        Err(StorageError::NotFound) => return Err(Error::not_found("Note not found")),
        Err(err) => return Err(err.into()),
    }

    tracing::debug!("Deleted note {}", note.id);

    Ok(Success::ok(MessageResponse::new("Note deleted")))
}

async fn get_note<S: Storage>(storage: &S, note_id: i64) -> Result<Note, Error> {
    storage
        .find_single_note_by_id(note_id)
        .await?
        .ok_or_else(|| Error::not_found("Note not found"))
}
