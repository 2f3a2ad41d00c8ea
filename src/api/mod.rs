//! All API endpoint setup

use axum::Router;
use axum::routing::get;

use crate::storage::Storage;

pub use request::CampaignReference;
pub use request::Form;
pub use request::PathParameters;
pub use request::check_content;
pub use request::check_description;
pub use request::check_name;
pub use request::check_title;
pub use request::parse_content;
pub use request::parse_name;
pub use response::Error;
pub use response::ErrorResponse;
pub use response::MessageResponse;
pub use response::Success;

mod campaigns;
mod notes;
mod openapi;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router<S> {
    let campaigns = Router::new()
        .route("/", get(campaigns::list::<S>).post(campaigns::create::<S>))
        .route(
            "/{campaign}",
            get(campaigns::single::<S>)
                .patch(campaigns::update::<S>)
                .delete(campaigns::delete::<S>),
        )
        .route("/{campaign}/notes", get(campaigns::notes::<S>));

    let notes = Router::new()
        .route("/", get(notes::list::<S>).post(notes::create::<S>))
        .route(
            "/{note}",
            get(notes::single::<S>)
                .patch(notes::update::<S>)
                .delete(notes::delete::<S>),
        );

    Router::new()
        .nest("/campaigns", campaigns)
        .nest("/notes", notes)
        .route("/openapi", get(openapi::document))
}
