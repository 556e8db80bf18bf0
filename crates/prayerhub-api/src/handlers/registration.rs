//! Registration and cancellation handlers.

use axum::Json;
use axum::extract::State;

use prayerhub_entity::user::UserIdentity;

use crate::dto::request::{CancelRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, RegisterResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    let info = &req.user_info;
    let identity = UserIdentity::parse(&info.name, &info.parish, &info.phone_last_4)?;

    let user = state.user_service.find_or_create(&identity).await?;
    let registration = state.admission.admit(user.id, req.slot_id).await?;

    Ok(Json(
        ApiResponse::ok(RegisterResponse {
            registration,
            user_id: user.id,
        })
        .with_message("성공적으로 신청되었습니다."),
    ))
}

/// POST /api/cancel
pub async fn cancel(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CancelRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .cancellation
        .cancel(req.user_id, req.registration_id)
        .await?;

    Ok(Json(
        ApiResponse::ok(()).with_message("성공적으로 취소되었습니다."),
    ))
}
