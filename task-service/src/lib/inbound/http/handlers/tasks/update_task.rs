use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::parse_task_id;
use super::TaskResponseData;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::string_field;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_task<US, TS>(
    State(state): State<AppState<US, TS>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(task_id): Path<String>,
    body: Result<Json<UpdateTaskRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let task_id = parse_task_id(&task_id)?;
    let Json(body) = body?;

    state
        .task_service
        .update_task(task_id, body.try_into_command()?, user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

/// Partial update body; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequestBody {
    title: Option<Value>,
    description: Option<Value>,
    status: Option<Value>,
}

impl UpdateTaskRequestBody {
    fn try_into_command(self) -> Result<UpdateTaskCommand, ApiError> {
        let mut messages = Vec::new();
        let mut command = UpdateTaskCommand::default();

        match string_field(self.title, "title") {
            Ok(Some(title)) => match TaskTitle::new(title) {
                Ok(title) => command.title = Some(title),
                Err(e) => messages.push(e.to_string()),
            },
            Ok(None) => {}
            Err(message) => messages.push(message),
        }
        match string_field(self.description, "description") {
            Ok(Some(description)) => match TaskDescription::new(description) {
                Ok(description) => command.description = Some(description),
                Err(e) => messages.push(e.to_string()),
            },
            Ok(None) => {}
            Err(message) => messages.push(message),
        }
        match string_field(self.status, "status") {
            Ok(Some(status)) => match status.parse::<TaskStatus>() {
                Ok(status) => command.status = Some(status),
                Err(e) => messages.push(e.to_string()),
            },
            Ok(None) => {}
            Err(message) => messages.push(message),
        }

        if !messages.is_empty() {
            return Err(ApiError::BadRequest(messages));
        }

        Ok(command)
    }
}
