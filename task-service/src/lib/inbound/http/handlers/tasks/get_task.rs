use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_task_id;
use super::TaskResponseData;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_task<US, TS>(
    State(state): State<AppState<US, TS>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let task_id = parse_task_id(&task_id)?;

    state
        .task_service
        .get_task(task_id, user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
