use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login::login;
use super::handlers::auth::register::register;
use super::handlers::method_not_allowed;
use super::handlers::route_not_found;
use super::handlers::tasks::create_task::create_task;
use super::handlers::tasks::delete_task::delete_task;
use super::handlers::tasks::get_task::get_task;
use super::handlers::tasks::list_tasks::list_tasks;
use super::handlers::tasks::update_task::update_task;
use super::handlers::tasks::update_task_status::update_task_status;
use super::middleware::authenticate;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;

pub struct AppState<US, TS>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    pub user_service: Arc<US>,
    pub task_service: Arc<TS>,
    pub token_issuer: Arc<TokenIssuer>,
}

// Manual impl: derive would require the services themselves to be Clone.
impl<US, TS> Clone for AppState<US, TS>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            task_service: Arc::clone(&self.task_service),
            token_issuer: Arc::clone(&self.token_issuer),
        }
    }
}

pub fn create_router<US, TS>(
    user_service: Arc<US>,
    task_service: Arc<TS>,
    token_issuer: Arc<TokenIssuer>,
) -> Router
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let state = AppState {
        user_service,
        task_service,
        token_issuer,
    };

    let public_routes = Router::new()
        .route(
            "/auth/register",
            post(register::<US, TS>).fallback(method_not_allowed),
        )
        .route(
            "/auth/login",
            post(login::<US, TS>).fallback(method_not_allowed),
        );

    let protected_routes = Router::new()
        .route(
            "/tasks",
            get(list_tasks::<US, TS>)
                .post(create_task::<US, TS>)
                .fallback(method_not_allowed),
        )
        .route(
            "/tasks/:id",
            get(get_task::<US, TS>)
                .patch(update_task::<US, TS>)
                .delete(delete_task::<US, TS>)
                .fallback(method_not_allowed),
        )
        .route(
            "/tasks/:id/status",
            patch(update_task_status::<US, TS>).fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<US, TS>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
