//! Registrant lookup and "my registrations".

use axum::Json;
use axum::extract::{Path, State};

use prayerhub_core::types::UserId;
use prayerhub_entity::registration::UserRegistration;
use prayerhub_entity::user::UserIdentity;

use crate::dto::request::UserInfoRequest;
use crate::dto::response::{ApiResponse, UserLookupResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/users/lookup
pub async fn lookup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UserInfoRequest>,
) -> Result<Json<ApiResponse<UserLookupResponse>>, ApiError> {
    let identity = UserIdentity::parse(&req.name, &req.parish, &req.phone_last_4)?;
    let user = state.user_service.lookup(&identity).await?;
    Ok(Json(ApiResponse::ok(UserLookupResponse { user_id: user.id })))
}

/// GET /api/users/{id}/registrations
pub async fn registrations(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<Vec<UserRegistration>>>, ApiError> {
    let rows = state.user_service.registrations(user_id).await?;
    Ok(Json(ApiResponse::ok(rows)))
}
