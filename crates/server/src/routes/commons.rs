use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use common::types::GenericMessage;
use models::{commons, user_commons};
use service::auth::domain::CurrentUser;
use service::commons::domain::{CreateCommonsParams, EditCommonsParams};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Commons id
    pub id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JoinQuery {
    #[serde(rename = "commonsId")]
    pub commons_id: i64,
}

#[utoipa::path(get, path = "/api/commons/all", tag = "commons", responses((status = 200, description = "Every commons", body = [crate::openapi::CommonsDoc]), (status = 401, description = "Unauthorized")))]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<commons::Model>>, JsonApiError> {
    metrics::record_operation("list_all");
    let all = state.commons.list_all().await?;
    info!(count = all.len(), "list commons");
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/commons", tag = "commons", params(IdQuery), responses((status = 200, description = "OK", body = crate::openapi::CommonsDoc), (status = 404, description = "Not Found")))]
pub async fn get_by_id(State(state): State<ServerState>, Query(q): Query<IdQuery>) -> Result<Json<commons::Model>, JsonApiError> {
    metrics::record_operation("get");
    Ok(Json(state.commons.get(q.id).await?))
}

#[utoipa::path(post, path = "/api/commons/new", tag = "commons", request_body = crate::openapi::CreateCommonsDoc, responses((status = 200, description = "Created", body = crate::openapi::CommonsDoc), (status = 403, description = "Forbidden"), (status = 422, description = "Missing or malformed field")))]
pub async fn create(State(state): State<ServerState>, Json(params): Json<CreateCommonsParams>) -> Result<Json<commons::Model>, JsonApiError> {
    metrics::record_operation("create");
    let saved = state.commons.create(params).await?;
    info!(commons_id = saved.id, name = %saved.name, "commons_created");
    Ok(Json(saved))
}

/// Joining twice is not an error; both calls answer with the same commons.
#[utoipa::path(post, path = "/api/commons/join", tag = "commons", params(JoinQuery), responses((status = 200, description = "Joined (or already a member)", body = crate::openapi::CommonsDoc), (status = 404, description = "Not Found")))]
pub async fn join(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(q): Query<JoinQuery>,
) -> Result<Json<commons::Model>, JsonApiError> {
    metrics::record_operation("join");
    let result = state.commons.join(q.commons_id, user.id).await?;
    metrics::record_join(result.membership.was_inserted());
    Ok(Json(result.commons))
}

#[utoipa::path(delete, path = "/api/commons/{commonsId}/users/{userId}", tag = "commons", params(("commonsId" = i64, Path, description = "Commons id"), ("userId" = i64, Path, description = "User id")), responses((status = 204, description = "Removed"), (status = 404, description = "Not Found")))]
pub async fn remove_user(
    State(state): State<ServerState>,
    Path((commons_id, user_id)): Path<(i64, i64)>,
) -> Result<StatusCode, JsonApiError> {
    metrics::record_operation("remove_user");
    state.commons.remove_user(commons_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/commons/{commonsId}/users", tag = "commons", params(("commonsId" = i64, Path, description = "Commons id")), responses((status = 200, description = "Memberships of the commons", body = [crate::openapi::UserCommonsDoc]), (status = 404, description = "Not Found")))]
pub async fn list_members(
    State(state): State<ServerState>,
    Path(commons_id): Path<i64>,
) -> Result<Json<Vec<user_commons::Model>>, JsonApiError> {
    metrics::record_operation("list_members");
    Ok(Json(state.commons.list_members(commons_id).await?))
}

/// Memberships of the deleted commons are left in place.
#[utoipa::path(delete, path = "/api/commons/delete", tag = "commons", params(IdQuery), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Not Found")))]
pub async fn delete_commons(State(state): State<ServerState>, Query(q): Query<IdQuery>) -> Result<Json<GenericMessage>, JsonApiError> {
    metrics::record_operation("delete");
    state.commons.delete(q.id).await?;
    info!(commons_id = q.id, "commons_deleted");
    Ok(Json(GenericMessage::new(format!("Record {} deleted", q.id))))
}

#[utoipa::path(put, path = "/api/commons", tag = "commons", params(IdQuery), request_body = crate::openapi::EditCommonsDoc, responses((status = 200, description = "Updated", body = crate::openapi::CommonsDoc), (status = 404, description = "Not Found")))]
pub async fn edit(
    State(state): State<ServerState>,
    Query(q): Query<IdQuery>,
    Json(params): Json<EditCommonsParams>,
) -> Result<Json<commons::Model>, JsonApiError> {
    metrics::record_operation("edit");
    Ok(Json(state.commons.edit(q.id, params).await?))
}
