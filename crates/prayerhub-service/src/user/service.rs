//! Registrant identification and registration listing.

use std::sync::Arc;

use chrono::FixedOffset;
use tracing::{debug, info};

use prayerhub_core::error::AppError;
use prayerhub_core::traits::Clock;
use prayerhub_core::types::UserId;
use prayerhub_database::{RegistrationStore, UserStore};
use prayerhub_entity::registration::UserRegistration;
use prayerhub_entity::user::{User, UserIdentity};

/// Finds, creates, and lists registrants.
#[derive(Debug, Clone)]
pub struct UserService {
    /// Registrant store.
    users: Arc<dyn UserStore>,
    /// Registration store.
    registrations: Arc<dyn RegistrationStore>,
    /// Time source for completion flags.
    clock: Arc<dyn Clock>,
    /// Offset slot dates and times are expressed in.
    offset: FixedOffset,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        registrations: Arc<dyn RegistrationStore>,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            users,
            registrations,
            clock,
            offset,
        }
    }

    /// Return the registrant with `identity`, creating it on first use.
    ///
    /// Two concurrent first registrations for the same identity both end
    /// up with the row that won the insert.
    pub async fn find_or_create(&self, identity: &UserIdentity) -> Result<User, AppError> {
        if let Some(user) = self
            .users
            .find_by_identity(identity)
            .await
            .map_err(|e| AppError::from(e).with_message("사용자 조회 중 오류가 발생했습니다."))?
        {
            return Ok(user);
        }

        match self.users.insert(identity).await {
            Ok(user) => {
                info!(user_id = %user.id, parish = %identity.parish(), "Registrant created");
                Ok(user)
            }
            Err(err) if err.is_unique_violation() => {
                debug!(parish = %identity.parish(), "Registrant created concurrently, re-reading");
                self.users
                    .find_by_identity(identity)
                    .await
                    .map_err(|e| {
                        AppError::from(e).with_message("사용자 조회 중 오류가 발생했습니다.")
                    })?
                    .ok_or_else(|| AppError::internal("사용자 등록 중 오류가 발생했습니다."))
            }
            Err(err) => {
                Err(AppError::from(err).with_message("사용자 등록 중 오류가 발생했습니다."))
            }
        }
    }

    /// Look up an existing registrant by identity.
    pub async fn lookup(&self, identity: &UserIdentity) -> Result<User, AppError> {
        self.users
            .find_by_identity(identity)
            .await
            .map_err(|e| AppError::from(e).with_message("사용자 조회 중 오류가 발생했습니다."))?
            .ok_or_else(|| AppError::not_found("등록된 사용자 정보를 찾을 수 없습니다."))
    }

    /// A registrant's registrations, earliest slot first, each flagged
    /// completed once its slot has ended.
    pub async fn registrations(&self, user_id: UserId) -> Result<Vec<UserRegistration>, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("등록된 사용자 정보를 찾을 수 없습니다."))?;

        let now = self.clock.now();
        let rows = self
            .registrations
            .list_for_user(user_id)
            .await
            .map_err(|e| AppError::from(e).with_message("신청 내역을 불러오는데 실패했습니다."))?;

        Ok(rows
            .into_iter()
            .map(|row| row.with_completion(now, self.offset))
            .collect())
    }
}
