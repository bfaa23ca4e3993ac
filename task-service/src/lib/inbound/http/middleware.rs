use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::domain::user::errors::UserError;

/// Identity of the caller, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that validates the bearer token and resolves its user.
///
/// The user is re-read on every request so tokens of deleted accounts stop
/// working immediately.
pub async fn authenticate<US, TS>(
    State(state): State<AppState<US, TS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    US: UserServicePort,
    TS: TaskServicePort,
{
    let token = extract_bearer_token(&req).ok_or_else(ApiError::unauthorized)?;

    let claims = state.token_issuer.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::unauthorized()
    })?;

    let user_id = UserId::from_string(&claims.id).map_err(|e| {
        tracing::warn!(error = %e, "Token carries a malformed user ID");
        ApiError::unauthorized()
    })?;

    let user = state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %user_id, "Token refers to a user that no longer exists");
                ApiError::unauthorized()
            }
            other => {
                tracing::error!(user_id = %user_id, error = %other, "Failed to resolve authenticated user");
                ApiError::from(other)
            }
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username.as_str().to_string(),
    });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with_authorization(value: &str) -> Request {
        Request::builder()
            .header(http::header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extracts_bearer_token() {
        let req = request_with_authorization("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let req = request_with_authorization("bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_rejects_other_schemes_and_missing_header() {
        let req = request_with_authorization("Basic YWxpY2U6c2VjcmV0");
        assert_eq!(extract_bearer_token(&req), None);

        let req = request_with_authorization("Bearer ");
        assert_eq!(extract_bearer_token(&req), None);

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_bearer_token(&req), None);
    }
}
