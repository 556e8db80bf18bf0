//! Validated registrant identity.

use serde::Serialize;

use prayerhub_core::AppError;

use super::parish::Parish;

/// The composite key a registrant is looked up by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    name: String,
    parish: Parish,
    phone_last_4: String,
}

impl UserIdentity {
    /// Validate raw form input into an identity.
    ///
    /// The name is trimmed and must be non-empty; the phone suffix must be
    /// exactly four ASCII digits.
    pub fn parse(name: &str, parish: &str, phone_last_4: &str) -> Result<Self, AppError> {
        let name = name.trim();
        let phone_last_4 = phone_last_4.trim();

        if name.is_empty() || parish.trim().is_empty() || phone_last_4.is_empty() {
            return Err(AppError::validation("모든 필수 정보를 입력해주세요."));
        }

        if phone_last_4.len() != 4 || !phone_last_4.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::validation(
                "휴대전화 뒷 4자리는 숫자 4자리여야 합니다.",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            parish: parish.parse()?,
            phone_last_4: phone_last_4.to_string(),
        })
    }

    /// Trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parish.
    pub fn parish(&self) -> Parish {
        self.parish
    }

    /// Four-digit phone suffix.
    pub fn phone_last_4(&self) -> &str {
        &self.phone_last_4
    }
}
