//! OpenAPI document of the API

use axum::Json;
use utoipa::OpenApi;

use super::campaigns;
use super::notes;
use super::response;

/// OpenAPI documentation for Campaign Notes
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campaign Notes API",
        description = "Manage RPG campaigns and the notes of their sessions",
    ),
    paths(
        campaigns::list,
        campaigns::single,
        campaigns::create,
        campaigns::update,
        campaigns::delete,
        campaigns::notes,
        notes::list,
        notes::single,
        notes::create,
        notes::update,
        notes::delete,
    ),
    components(schemas(
        campaigns::CampaignResponse,
        campaigns::CreateCampaignForm,
        campaigns::UpdateCampaignForm,
        notes::NoteResponse,
        notes::CreateNoteForm,
        notes::UpdateNoteForm,
        response::MessageResponse,
        response::ErrorResponse,
    )),
    tags(
        (name = "campaigns", description = "RPG campaigns"),
        (name = "notes", description = "Notes of the sessions of a campaign"),
    ),
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
