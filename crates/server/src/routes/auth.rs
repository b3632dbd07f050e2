use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use tracing::{debug, warn};

use service::auth::{
    domain::{CurrentUser, Role},
    errors::AuthError,
    TokenService,
};
use service::commons::CommonsService;

use crate::errors::JsonApiError;

/// Cookie consulted when no `Authorization` header is sent.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub commons: Arc<CommonsService>,
    pub tokens: Arc<TokenService>,
}

/// Pull the raw token out of `Authorization: Bearer` or the `auth_token` cookie.
fn extract_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".into()))?;
        return value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AuthError::InvalidToken("expected Bearer scheme".into()));
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
        .ok_or(AuthError::MissingToken)
}

/// Verifies the caller's token and stores the resulting [`CurrentUser`] in request extensions.
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = extract_token(req.headers())?;
    let user = state.tokens.verify(&token)?;
    debug!(user_id = user.id, path = %req.uri().path(), "authenticated");
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Role guard; must run after [`authenticate`].
pub async fn require_role(
    State(required): State<Role>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AuthError::MissingToken)?;
    if !user.has_role(required) {
        warn!(user_id = user.id, required = required.as_str(), path = %req.uri().path(), "role check failed");
        return Err(AuthError::Forbidden(required.as_str()).into());
    }
    Ok(next.run(req).await)
}

#[utoipa::path(get, path = "/api/currentUser", tag = "auth", responses((status = 200, description = "Verified identity of the caller", body = crate::openapi::CurrentUserDoc), (status = 401, description = "Unauthorized")))]
pub async fn current_user(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}
