use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::TaskResponseData;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::string_field;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_task<US, TS>(
    State(state): State<AppState<US, TS>>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<CreateTaskRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let Json(body) = body?;

    tracing::debug!(username = %user.username, data = ?body, "User creating a new task");

    state
        .task_service
        .create_task(body.try_into_command()?, user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequestBody {
    title: Option<Value>,
    description: Option<Value>,
}

impl CreateTaskRequestBody {
    fn try_into_command(self) -> Result<CreateTaskCommand, ApiError> {
        let title = string_field(self.title, "title")
            .and_then(|title| TaskTitle::new(title.unwrap_or_default()).map_err(|e| e.to_string()));
        let description = string_field(self.description, "description").and_then(|description| {
            TaskDescription::new(description.unwrap_or_default()).map_err(|e| e.to_string())
        });

        match (title, description) {
            (Ok(title), Ok(description)) => Ok(CreateTaskCommand::new(title, description)),
            (title, description) => Err(ApiError::BadRequest(
                title.err().into_iter().chain(description.err()).collect(),
            )),
        }
    }
}
