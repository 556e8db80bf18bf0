//! Public slot listing.

use axum::Json;
use axum::extract::{Query, State};

use prayerhub_entity::slot::SlotStatus;

use super::parse_date;
use crate::dto::request::DateQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/slots?date=YYYY-MM-DD
pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ApiResponse<Vec<SlotStatus>>>, ApiError> {
    let date = parse_date(query.date.as_deref())?;
    let slots = state.slot_service.list_for_date(date).await?;
    Ok(Json(ApiResponse::ok(slots)))
}
