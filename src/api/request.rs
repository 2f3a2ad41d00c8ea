//! API request helpers

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::campaigns::MAX_NAME_LENGTH;
use crate::notes::MAX_TITLE_LENGTH;

use super::Error;

/// Parse and validate a required campaign name
///
/// ```rust
/// let name = Some("Curse of Strahd".to_string());
/// assert!(parse_name(name).is_ok())
/// ```
pub fn parse_name(name: Option<String>) -> Result<String, Error> {
    let Some(name) = name else {
        return Err(Error::bad_request("Name is required"));
    };

    check_name(&name)?;

    Ok(name)
}

/// Validate a campaign name that is being changed
pub fn check_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::bad_request("Name can not be empty"));
    }

    check_characters("Name", name)?;

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::bad_request(format!(
            "Name can not be longer than {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate an optional note title
pub fn check_title(title: Option<&str>) -> Result<(), Error> {
    if let Some(title) = title {
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(Error::bad_request(format!(
                "Title can not be longer than {MAX_TITLE_LENGTH} characters"
            )));
        }

        check_characters("Title", title)?;
    }

    Ok(())
}

/// Validate an optional campaign description
pub fn check_description(description: Option<&str>) -> Result<(), Error> {
    if let Some(description) = description {
        check_characters("Description", description)?;
    }

    Ok(())
}

/// Parse and validate required note content
pub fn parse_content(content: Option<String>) -> Result<String, Error> {
    let Some(content) = content else {
        return Err(Error::bad_request("Content is required"));
    };

    check_content(&content)?;

    Ok(content)
}

/// Validate note content that is being changed
pub fn check_content(content: &str) -> Result<(), Error> {
    if content.trim().is_empty() {
        return Err(Error::bad_request("Content can not be empty"));
    }

    check_characters("Content", content)?;

    Ok(())
}

/// Postgres can not store NUL in text columns
fn check_characters(field: &str, value: &str) -> Result<(), Error> {
    if value.contains('\0') {
        return Err(Error::bad_request(format!("{field} can not contain NUL characters")));
    }

    Ok(())
}

/// How a request points at a campaign
#[derive(Debug, PartialEq, Eq)]
pub enum CampaignReference {
    /// By its ID
    Id(i64),

    /// By its name, first match wins
    Name(String),
}

impl CampaignReference {
    /// A path segment that reads as a number is an ID, anything else a name
    pub fn from_segment(segment: String) -> Result<Self, Error> {
        if segment.trim().is_empty() {
            return Err(Error::bad_request("Campaign can not be empty"));
        }

        check_characters("Campaign", &segment)?;

        Ok(segment.parse::<i64>().map_or(Self::Name(segment), Self::Id))
    }

    /// The body of a request names the campaign by either `campaign_id` or `campaign_name`
    pub fn from_fields(
        campaign_id: Option<i64>,
        campaign_name: Option<String>,
    ) -> Result<Self, Error> {
        match (campaign_id, campaign_name) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(name)) => {
                if name.trim().is_empty() {
                    Err(Error::bad_request("Campaign name can not be empty"))
                } else if name.contains('\0') {
                    Err(Error::bad_request("Campaign name can not contain NUL characters"))
                } else {
                    Ok(Self::Name(name))
                }
            }
            (None, None) => Err(Error::bad_request(
                "Campaign is required, use `campaign_id` or `campaign_name`",
            )),
            (Some(_), Some(_)) => Err(Error::bad_request(
                "Use either `campaign_id` or `campaign_name`, not both",
            )),
        }
    }
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_detail(err.body_text()))
            }
            JsonRejection::JsonSyntaxError(err) => {
                Err(Error::bad_request("JSON syntax error").with_detail(err.body_text()))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_detail(err.body_text()))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_detail(err.body_text())),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request("Invalid path parameter").with_detail(err.body_text()))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_detail(err.body_text()))
            }
            err => Err(Error::bad_request("Unknown path error").with_detail(err.body_text())),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path).map(PathParameters)
    }
}
