//! API response helpers

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use utoipa::ToSchema;

use crate::storage;

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: V,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data,
        }
    }
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        (self.status_code, Json(self.data)).into_response()
    }
}

/// Confirmation of an action without an entity to show
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// What happened
    pub message: String,
}

impl MessageResponse {
    pub fn new<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            message: message.to_string(),
        }
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
    detail: Option<String>,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            detail: None,
        }
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::NOT_FOUND,
            message: message.to_string(),
            detail: None,
        }
    }

    pub fn internal_server_error<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail<M>(self, detail: M) -> Self
    where
        M: ToString,
    {
        Self {
            detail: Some(detail.to_string()),
            ..self
        }
    }
}

impl From<storage::Error> for Error {
    fn from(err: storage::Error) -> Self {
        match err {
            storage::Error::Integrity(detail) => {
                tracing::debug!("Write refused by storage: {detail}");

                Error::bad_request("Integrity error").with_detail(detail)
            }
            storage::Error::NotFound => Error::not_found("Not found"),
            err @ storage::Error::Connection(_) => {
                tracing::error!("Storage failure: {err}");

                Error::internal_server_error("Internal server error").with_detail(err)
            }
        }
    }
}

/// Error body, `detail` is only present when there is more to tell
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// What went wrong
    pub message: String,

    /// Extra diagnostics, like the reason a JSON body was refused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(ErrorResponse {
                message: self.message,
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
