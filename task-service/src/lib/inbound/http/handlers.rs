use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::domain::task::errors::TaskError;
use crate::domain::user::errors::UserError;

pub mod auth;
pub mod tasks;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error answered to the client.
///
/// `InternalServerError` carries the cause for logs only; the response body
/// always says "Internal server error".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(Vec<String>),
    NotFound(String),
    MethodNotAllowed(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Invalid credentials".to_string())
    }

    pub fn invalid_uuid() -> Self {
        ApiError::BadRequest(vec!["Validation failed (uuid is expected)".to_string()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let messages = match self {
            ApiError::InternalServerError(_) => vec![INTERNAL_SERVER_ERROR_MESSAGE.to_string()],
            ApiError::BadRequest(messages) => messages,
            ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg) => vec![msg],
        };

        (status, Json(ApiErrorBody::new(status, messages))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(e) => ApiError::BadRequest(vec![e.to_string()]),
            UserError::InvalidUsername(e) => ApiError::BadRequest(vec![e.to_string()]),
            UserError::InvalidPassword(e) => ApiError::BadRequest(vec![e.to_string()]),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => {
                ApiError::Conflict("Username already exists".to_string())
            }
            UserError::Hashing(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidTaskId(_) => ApiError::invalid_uuid(),
            TaskError::InvalidTitle(e) => ApiError::BadRequest(vec![e.to_string()]),
            TaskError::InvalidDescription(e) => ApiError::BadRequest(vec![e.to_string()]),
            TaskError::InvalidStatus(e) => ApiError::BadRequest(vec![e.to_string()]),
            TaskError::InvalidSearch(e) => ApiError::BadRequest(vec![e.to_string()]),
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(vec![rejection.body_text()])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(vec![rejection.body_text()])
    }
}

/// Reads an optional string field of a JSON body.
///
/// Request bodies keep their fields as raw JSON values, so a wrong type is
/// reported next to the other violations instead of failing the whole body.
/// Absent and `null` fields read as `None`.
pub fn string_field(value: Option<Value>, field: &str) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(format!("{} must be a string", field)),
    }
}

/// Error response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub messages: Vec<String>,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(status: StatusCode, messages: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            messages,
            error: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

/// Fallback for paths no route matches.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Cannot {} {}", method, uri.path()))
}

/// Fallback for known paths hit with a method they do not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("Cannot {} {}", method, uri.path()))
}
