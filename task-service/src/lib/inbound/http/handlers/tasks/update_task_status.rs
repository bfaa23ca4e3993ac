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
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::string_field;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_task_status<US, TS>(
    State(state): State<AppState<US, TS>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(task_id): Path<String>,
    body: Result<Json<UpdateTaskStatusRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let task_id = parse_task_id(&task_id)?;
    let Json(body) = body?;
    let status = body.try_into_status()?;

    state
        .task_service
        .update_task(task_id, UpdateTaskCommand::status(status), user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskStatusRequestBody {
    status: Option<Value>,
}

impl UpdateTaskStatusRequestBody {
    // A missing status is reported like an unknown one.
    fn try_into_status(self) -> Result<TaskStatus, ApiError> {
        string_field(self.status, "status")
            .map_err(|message| ApiError::BadRequest(vec![message]))?
            .unwrap_or_default()
            .parse::<TaskStatus>()
            .map_err(|e| ApiError::BadRequest(vec![e.to_string()]))
    }
}
