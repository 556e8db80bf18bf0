//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use prayerhub_core::types::{RegistrationId, SlotId, UserId};

/// Registrant identity fields as submitted by the form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserInfoRequest {
    /// Display name.
    #[validate(length(min = 1, message = "모든 필수 정보를 입력해주세요."))]
    pub name: String,
    /// Parish label.
    #[validate(length(min = 1, message = "모든 필수 정보를 입력해주세요."))]
    pub parish: String,
    /// Last four phone digits.
    #[validate(length(min = 1, message = "모든 필수 정보를 입력해주세요."))]
    pub phone_last_4: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Registrant identity.
    #[validate(nested)]
    pub user_info: UserInfoRequest,
    /// Slot to register for.
    pub slot_id: SlotId,
}

/// Cancellation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    /// Registration to cancel.
    pub registration_id: RegistrationId,
    /// Owner of the registration.
    pub user_id: UserId,
}

/// `?date=YYYY-MM-DD` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateQuery {
    /// Raw date string; parsed by the handler so that format errors carry a
    /// readable message.
    pub date: Option<String>,
}

/// Admin code verification body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminVerifyRequest {
    /// Candidate code.
    #[validate(length(min = 1, message = "관리자 코드를 입력해주세요."))]
    pub code: String,
}

/// Global settings update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGlobalSettingsRequest {
    /// New per-slot capacity.
    #[validate(range(min = 1, message = "유효하지 않은 값입니다. 1 이상의 숫자를 입력해주세요."))]
    pub max_participants: i32,
}
