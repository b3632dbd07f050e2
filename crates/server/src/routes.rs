use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::auth::domain::Role;

use crate::metrics;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod commons;

pub use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public probes, USER routes and ADMIN routes.
///
/// Every `/api` route passes `authenticate` first, then the role guard of its group.
/// When `frontend_dir` is set, unmatched paths fall through to the static frontend.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: Option<&str>) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    // USER routes
    let user_api = Router::new()
        .route("/api/commons/all", get(commons::list_all))
        .route("/api/commons", get(commons::get_by_id))
        .route("/api/commons/join", post(commons::join))
        .route("/api/currentUser", get(auth::current_user))
        .route_layer(middleware::from_fn_with_state(Role::User, auth::require_role));

    // ADMIN routes; `/api/commons` PUT merges with the USER GET above
    let admin_api = Router::new()
        .route("/api/commons/new", post(commons::create))
        .route("/api/commons", put(commons::edit))
        .route("/api/commons/delete", delete(commons::delete_commons))
        .route("/api/commons/:commonsId/users", get(commons::list_members))
        .route("/api/commons/:commonsId/users/:userId", delete(commons::remove_user))
        .route_layer(middleware::from_fn_with_state(Role::Admin, auth::require_role));

    let api = user_api
        .merge(admin_api)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::authenticate));

    let mut router = public.merge(api).with_state(state);
    if let Some(dir) = frontend_dir {
        let index = format!("{}/index.html", dir.trim_end_matches('/'));
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
