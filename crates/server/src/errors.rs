use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Error body returned by every API route: `{"error": "...", "message": "..."}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    /// 500 without details; the cause is logged where it is raised.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some("internal server error".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { .. } => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Db(_) | ServiceError::Model(_) => {
                error!(err = %e, "storage failure");
                JsonApiError::internal()
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        warn!(code = e.code(), err = %e, "request rejected");
        match e {
            AuthError::Forbidden(_) => JsonApiError::new(StatusCode::FORBIDDEN, "Forbidden", Some(e.to_string())),
            AuthError::TokenError(_) => JsonApiError::internal(),
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use models::errors::ModelError;

    async fn body_of(err: JsonApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn storage_failure_hides_driver_text() {
        let err = ServiceError::Model(ModelError::Db("connection refused: postgres://u:pw@db/commons".into()));
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal Server Error", "message": "internal server error" }));
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let (status, body) = body_of(ServiceError::not_found("Commons", 7).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Commons with id 7 not found");
    }

    #[tokio::test]
    async fn auth_errors_map_to_401_and_403() {
        let (status, _) = body_of(AuthError::MissingToken.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, body) = body_of(AuthError::Forbidden("ADMIN").into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");
    }
}
