use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::Credentials;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::string_field;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange credentials for an access token.
///
/// Malformed bodies, missing fields, unknown users and wrong passwords all
/// answer 401 "Invalid credentials".
pub async fn login<US, TS>(
    State(state): State<AppState<US, TS>>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let credentials = body
        .ok()
        .and_then(|Json(body)| body.into_credentials())
        .ok_or_else(ApiError::invalid_credentials)?;

    let user = state
        .user_service
        .verify_credentials(credentials)
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    let access_token = state
        .token_issuer
        .issue(user.id, user.username.as_str())
        .map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Failed to issue access token");
            ApiError::InternalServerError(e.to_string())
        })?;

    tracing::debug!(user_id = %user.id, expires_at = access_token.expires_at, "Access token issued");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: access_token.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: Option<Value>,
    password: Option<Value>,
}

impl LoginRequestBody {
    fn into_credentials(self) -> Option<Credentials> {
        let username = string_field(self.username, "username")
            .ok()
            .flatten()
            .filter(|u| !u.is_empty())?;
        let password = string_field(self.password, "password")
            .ok()
            .flatten()
            .filter(|p| !p.is_empty())?;
        Some(Credentials { username, password })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_not_credentials() {
        let body = LoginRequestBody {
            username: Some(Value::from("alice")),
            password: Some(Value::from("")),
        };
        assert!(body.into_credentials().is_none());

        let body = LoginRequestBody {
            username: None,
            password: Some(Value::from("Str0ngP@ss")),
        };
        assert!(body.into_credentials().is_none());
    }

    #[test]
    fn test_non_string_fields_are_not_credentials() {
        let body = LoginRequestBody {
            username: Some(Value::from(5)),
            password: Some(Value::from("Str0ngP@ss")),
        };
        assert!(body.into_credentials().is_none());

        let body = LoginRequestBody {
            username: Some(Value::from("alice")),
            password: Some(Value::from("Str0ngP@ss")),
        };
        let credentials = body.into_credentials().unwrap();
        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password, "Str0ngP@ss");
    }

    #[test]
    fn test_login_response_is_camel_case() {
        let json = serde_json::to_value(LoginResponseData {
            access_token: "token".to_string(),
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({ "accessToken": "token" }));
    }
}
