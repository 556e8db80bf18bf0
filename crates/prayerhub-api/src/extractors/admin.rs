//! `AdminGuard` extractor: checks the shared administrator code header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use prayerhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the administrator code.
pub const ADMIN_CODE_HEADER: &str = "x-admin-code";

/// Proof that the request carried a valid administrator code.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let code = parts
            .headers
            .get(ADMIN_CODE_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("관리자 인증이 필요합니다."))?;

        state.admin_service.verify_code(code)?;
        Ok(Self)
    }
}
