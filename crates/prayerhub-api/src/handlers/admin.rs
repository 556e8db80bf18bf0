//! Administrator handlers. Every route except verification requires
//! [`AdminGuard`].

use axum::Json;
use axum::extract::{Path, Query, State};

use prayerhub_core::types::SlotId;
use prayerhub_entity::registration::SlotRegistrant;
use prayerhub_entity::slot::SlotStatus;
use prayerhub_service::DashboardStats;

use super::parse_date;
use crate::dto::request::{AdminVerifyRequest, DateQuery, UpdateGlobalSettingsRequest};
use crate::dto::response::{ApiResponse, GlobalSettingsResponse};
use crate::error::ApiError;
use crate::extractors::{AdminGuard, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/verify
pub async fn verify(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AdminVerifyRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.admin_service.verify_code(&req.code)?;
    Ok(Json(
        ApiResponse::ok(()).with_message("관리자 인증이 완료되었습니다."),
    ))
}

/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminGuard,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.admin_service.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/admin/global-settings
pub async fn get_global_settings(
    State(state): State<AppState>,
    _admin: AdminGuard,
) -> Result<Json<ApiResponse<GlobalSettingsResponse>>, ApiError> {
    let max_participants = state.admin_service.global_capacity().await?;
    Ok(Json(ApiResponse::ok(GlobalSettingsResponse {
        max_participants,
    })))
}

/// PUT /api/admin/global-settings
pub async fn update_global_settings(
    State(state): State<AppState>,
    _admin: AdminGuard,
    ValidatedJson(req): ValidatedJson<UpdateGlobalSettingsRequest>,
) -> Result<Json<ApiResponse<GlobalSettingsResponse>>, ApiError> {
    let setting = state
        .admin_service
        .update_global_capacity(req.max_participants)
        .await?;
    Ok(Json(
        ApiResponse::ok(GlobalSettingsResponse {
            max_participants: setting.setting_value,
        })
        .with_message("최대 신청인원이 성공적으로 수정되었습니다."),
    ))
}

/// GET /api/admin/slots?date=YYYY-MM-DD
pub async fn list_slots(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Query(query): Query<DateQuery>,
) -> Result<Json<ApiResponse<Vec<SlotStatus>>>, ApiError> {
    let date = parse_date(query.date.as_deref())?;
    let slots = state.admin_service.slots_on(date).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// GET /api/admin/slots/{id}/registrations
pub async fn slot_registrations(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(slot_id): Path<SlotId>,
) -> Result<Json<ApiResponse<Vec<SlotRegistrant>>>, ApiError> {
    let registrants = state.admin_service.slot_registrants(slot_id).await?;
    Ok(Json(ApiResponse::ok(registrants)))
}
