use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::TaskResponseData;
use crate::domain::task::models::SearchTerm;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks<US, TS>(
    State(state): State<AppState<US, TS>>,
    Extension(user): Extension<AuthenticatedUser>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<TaskResponseData>>, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let Query(query) = query?;

    tracing::debug!(
        username = %user.username,
        filters = ?query,
        "User retrieving all tasks"
    );

    let tasks = state
        .task_service
        .list_tasks(query.try_into_filter()?, user.user_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        tasks.iter().map(TaskResponseData::from).collect(),
    ))
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksQuery {
    status: Option<String>,
    search: Option<String>,
}

impl ListTasksQuery {
    fn try_into_filter(self) -> Result<TaskFilter, ApiError> {
        let mut messages = Vec::new();

        let status = match self.status.map(|raw| raw.parse::<TaskStatus>()) {
            Some(Ok(status)) => Some(status),
            Some(Err(e)) => {
                messages.push(e.to_string());
                None
            }
            None => None,
        };

        let search = match self.search.map(SearchTerm::new) {
            Some(Ok(search)) => Some(search),
            Some(Err(e)) => {
                messages.push(e.to_string());
                None
            }
            None => None,
        };

        if !messages.is_empty() {
            return Err(ApiError::BadRequest(messages));
        }

        Ok(TaskFilter { status, search })
    }
}
