use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::string_field;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register<US, TS>(
    State(state): State<AppState<US, TS>>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: Option<Value>,
    password: Option<Value>,
}

impl RegisterRequestBody {
    /// Validates both fields and reports every violation at once.
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let (username, username_violations) = match string_field(self.username, "username") {
            Ok(username) => {
                let username = username.unwrap_or_default();
                let violations = Username::violations(&username)
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                (username, violations)
            }
            Err(message) => (String::new(), vec![message]),
        };
        let (password, password_violations) = match string_field(self.password, "password") {
            Ok(password) => {
                let password = password.unwrap_or_default();
                let violations = Password::violations(&password)
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                (password, violations)
            }
            Err(message) => (String::new(), vec![message]),
        };

        let messages: Vec<String> = username_violations
            .into_iter()
            .chain(password_violations)
            .collect();
        if !messages.is_empty() {
            return Err(ApiError::BadRequest(messages));
        }

        let username =
            Username::new(username).map_err(|e| ApiError::BadRequest(vec![e.to_string()]))?;
        let password =
            Password::new(password).map_err(|e| ApiError::BadRequest(vec![e.to_string()]))?;

        Ok(RegisterUserCommand::new(username, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(username: &str, password: &str) -> RegisterRequestBody {
        RegisterRequestBody {
            username: Some(Value::from(username)),
            password: Some(Value::from(password)),
        }
    }

    #[test]
    fn test_valid_body_becomes_command() {
        let command = body("alice", "Str0ngP@ss")
            .try_into_command()
            .expect("Body should be valid");

        assert_eq!(command.username.as_str(), "alice");
        assert_eq!(command.password.as_str(), "Str0ngP@ss");
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = body("abc", "password")
            .try_into_command()
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::BadRequest(vec![
                "username must be longer than or equal to 4 characters".to_string(),
                "password must contains: 1 upper case letter; 1 lower case letter; 1 number or special character".to_string(),
            ])
        );
    }

    #[test]
    fn test_wrong_type_is_reported_with_other_violations() {
        let body: RegisterRequestBody =
            serde_json::from_value(serde_json::json!({ "username": 5, "password": "" })).unwrap();

        let err = body.try_into_command().unwrap_err();

        match err {
            ApiError::BadRequest(messages) => {
                assert_eq!(messages[0], "username must be a string");
                assert!(messages.contains(&"password should not be empty".to_string()));
                assert!(messages.len() > 2);
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let err = RegisterRequestBody::default()
            .try_into_command()
            .unwrap_err();

        match err {
            ApiError::BadRequest(messages) => {
                assert!(messages.contains(&"username should not be empty".to_string()));
                assert!(messages.contains(&"password should not be empty".to_string()));
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_response_omits_password_hash() {
        let user = User {
            id: crate::domain::user::models::UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$2b$04$hash".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(RegisterResponseData::from(&user)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(object["username"], "alice");
        assert!(object.contains_key("createdAt"));
    }
}
