//! Campaigns API endpoints
//!
//! Everything related to the campaigns management

use axum::extract::State;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::campaigns::Campaign;
use crate::storage::CreateCampaignValues;
use crate::storage::Error as StorageError;
use crate::storage::Storage;
use crate::storage::UpdateCampaignValues;

use super::CampaignReference;
use super::Error;
use super::ErrorResponse;
use super::Form;
use super::MessageResponse;
use super::PathParameters;
use super::Success;
use super::check_description;
use super::check_name;
use super::notes::NoteResponse;
use super::parse_name;

/// Campaign response going to the user
#[derive(Debug, Serialize, ToSchema)]
pub struct CampaignResponse {
    /// Campaign ID
    pub id: i64,

    /// Name of the campaign
    pub name: String,

    /// Description of the campaign
    pub description: Option<String>,

    /// Creation date
    pub created_at: DateTime<Utc>,
}

impl CampaignResponse {
    /// Create a response from a [`Campaign`](Campaign)
    fn from_campaign(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            description: campaign.description,
            created_at: campaign.created_at,
        }
    }

    /// Create a response from multiple [`Campaign`](Campaign)s
    fn from_campaign_multiple(campaigns: Vec<Campaign>) -> Vec<Self> {
        campaigns.into_iter().map(Self::from_campaign).collect()
    }
}

/// List all campaigns
#[utoipa::path(
    get,
    path = "/campaigns",
    tag = "campaigns",
    responses(
        (status = 200, description = "All campaigns, ordered by ID", body = [CampaignResponse]),
    ),
)]
pub async fn list<S: Storage>(
    State(storage): State<S>,
) -> Result<Success<Vec<CampaignResponse>>, Error> {
    let campaigns = storage.find_all_campaigns().await?;

    Ok(Success::ok(CampaignResponse::from_campaign_multiple(campaigns)))
}

/// Get a single campaign
#[utoipa::path(
    get,
    path = "/campaigns/{campaign}",
    tag = "campaigns",
    params(("campaign" = i64, Path, description = "Campaign ID")),
    responses(
        (status = 200, description = "The campaign", body = CampaignResponse),
        (status = 400, description = "Invalid campaign ID", body = ErrorResponse),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    ),
)]
pub async fn single<S: Storage>(
    State(storage): State<S>,
    PathParameters(campaign_id): PathParameters<i64>,
) -> Result<Success<CampaignResponse>, Error> {
    get_campaign(&storage, campaign_id)
        .await
        .map(|campaign| Success::ok(CampaignResponse::from_campaign(campaign)))
}

/// Form to create a campaign
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCampaignForm {
    /// Name of the campaign, at most 100 characters
    name: Option<String>,

    /// Optional description
    description: Option<String>,
}

/// Create a campaign
#[utoipa::path(
    post,
    path = "/campaigns",
    tag = "campaigns",
    request_body = CreateCampaignForm,
    responses(
        (status = 201, description = "The created campaign", body = CampaignResponse),
        (status = 400, description = "Invalid campaign", body = ErrorResponse),
    ),
)]
pub async fn create<S: Storage>(
    State(storage): State<S>,
    Form(form): Form<CreateCampaignForm>,
) -> Result<Success<CampaignResponse>, Error> {
    let name = parse_name(form.name)?;
    check_description(form.description.as_deref())?;

    let values = CreateCampaignValues {
        name: &name,
        description: form.description.as_deref(),
    };

    let campaign = storage.create_campaign(&values).await?;

    tracing::debug!("Created campaign {}: {}", campaign.id, campaign.name);

    Ok(Success::created(CampaignResponse::from_campaign(campaign)))
}

/// Form to update a campaign, absent fields are left alone
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCampaignForm {
    /// New name of the campaign
    name: Option<String>,

    /// New description of the campaign
    description: Option<String>,
}

/// Update a campaign
#[utoipa::path(
    patch,
    path = "/campaigns/{campaign}",
    tag = "campaigns",
    params(("campaign" = i64, Path, description = "Campaign ID")),
    request_body = UpdateCampaignForm,
    responses(
        (status = 200, description = "The updated campaign", body = CampaignResponse),
        (status = 400, description = "Invalid campaign", body = ErrorResponse),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    ),
)]
pub async fn update<S: Storage>(
    State(storage): State<S>,
    PathParameters(campaign_id): PathParameters<i64>,
    Form(form): Form<UpdateCampaignForm>,
) -> Result<Success<CampaignResponse>, Error> {
    if let Some(name) = &form.name {
        check_name(name)?;
    }
    check_description(form.description.as_deref())?;

    let campaign = get_campaign(&storage, campaign_id).await?;

    let values = UpdateCampaignValues {
        name: form.name.as_deref(),
        description: form.description.as_deref(),
    };

    let campaign = storage.update_campaign(&campaign, &values).await?;

    tracing::debug!("Updated campaign {}", campaign.id);

    Ok(Success::ok(CampaignResponse::from_campaign(campaign)))
}

/// Delete a campaign, together with all of its notes
#[utoipa::path(
    delete,
    path = "/campaigns/{campaign}",
    tag = "campaigns",
    params(("campaign" = i64, Path, description = "Campaign ID")),
    responses(
        (status = 200, description = "Campaign deleted", body = MessageResponse),
        (status = 400, description = "Invalid campaign ID", body = ErrorResponse),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    ),
)]
pub async fn delete<S: Storage>(
    State(storage): State<S>,
    PathParameters(campaign_id): PathParameters<i64>,
) -> Result<Success<MessageResponse>, Error> {
    let campaign = get_campaign(&storage, campaign_id).await?;

    match storage.delete_campaign(&campaign).await {
        Ok(()) => {}
        // gone since the lookup, e.g. a concurrent delete
        Err(StorageError::NotFound) => return Err(Error::not_found("Campaign not found")),
        Err(err) => return Err(err.into()),
    }

    tracing::debug!("Deleted campaign {}", campaign.id);

    Ok(Success::ok(MessageResponse::new("Campaign deleted")))
}

/// List all notes of a campaign
///
/// The campaign is addressed by ID or, when the segment is not a number, by name
#[utoipa::path(
    get,
    path = "/campaigns/{campaign}/notes",
    tag = "notes",
    params(("campaign" = String, Path, description = "Campaign ID or name")),
    responses(
        (status = 200, description = "Notes of the campaign, ordered by ID", body = [NoteResponse]),
        (status = 404, description = "Campaign not found", body = ErrorResponse),
    ),
)]
pub async fn notes<S: Storage>(
    State(storage): State<S>,
    PathParameters(campaign): PathParameters<String>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let reference = CampaignReference::from_segment(campaign)?;

    let campaign = find_campaign(&storage, &reference)
        .await?
        .ok_or_else(|| Error::not_found("Campaign not found"))?;

    let notes = storage.find_all_notes_by_campaign(&campaign).await?;

    Ok(Success::ok(NoteResponse::from_note_multiple(notes)))
}

/// Fetch a campaign by ID, or respond with `404 Not Found`
async fn get_campaign<S: Storage>(storage: &S, campaign_id: i64) -> Result<Campaign, Error> {
    storage
        .find_single_campaign_by_id(campaign_id)
        .await?
        .ok_or_else(|| Error::not_found("Campaign not found"))
}

/// Resolve a campaign reference
pub async fn find_campaign<S: Storage>(
    storage: &S,
    reference: &CampaignReference,
) -> Result<Option<Campaign>, Error> {
    let campaign = match reference {
        CampaignReference::Id(id) => storage.find_single_campaign_by_id(*id).await?,
        CampaignReference::Name(name) => storage.find_single_campaign_by_name(name).await?,
    };

    Ok(campaign)
}
