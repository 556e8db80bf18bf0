//! Registration cancellation.

use std::sync::Arc;

use chrono::FixedOffset;
use thiserror::Error;
use tracing::{debug, info};

use prayerhub_core::error::{AppError, ErrorKind};
use prayerhub_core::traits::Clock;
use prayerhub_core::types::{RegistrationId, UserId};
use prayerhub_database::{RegistrationStore, SlotStore, StoreError};

/// Why a cancellation was refused.
#[derive(Debug, Error)]
pub enum CancellationError {
    /// No registration with this id is owned by the caller.
    #[error("존재하지 않는 신청입니다.")]
    NotFound,
    /// The slot has already started.
    #[error("이미 지난 시간대는 취소할 수 없습니다.")]
    SlotAlreadyPassed,
    /// Any store failure.
    #[error("신청 취소 중 오류가 발생했습니다.")]
    Transient(#[source] StoreError),
}

impl From<CancellationError> for AppError {
    fn from(err: CancellationError) -> Self {
        let message = err.to_string();
        match err {
            CancellationError::NotFound => AppError::not_found(message),
            CancellationError::SlotAlreadyPassed => AppError::validation(message),
            CancellationError::Transient(source) => {
                AppError::with_source(ErrorKind::Database, message, source)
            }
        }
    }
}

/// Cancels registrations on behalf of their owners.
///
/// Ownership is part of every lookup and delete predicate: a registration
/// owned by someone else is indistinguishable from a missing one.
#[derive(Debug, Clone)]
pub struct CancellationController {
    /// Slot store.
    slots: Arc<dyn SlotStore>,
    /// Registration store.
    registrations: Arc<dyn RegistrationStore>,
    /// Time source for the "already started" check.
    clock: Arc<dyn Clock>,
    /// Offset slot dates and times are expressed in.
    offset: FixedOffset,
}

impl CancellationController {
    /// Creates a new cancellation controller.
    pub fn new(
        slots: Arc<dyn SlotStore>,
        registrations: Arc<dyn RegistrationStore>,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            slots,
            registrations,
            clock,
            offset,
        }
    }

    /// Cancel `registration_id` if it belongs to `user_id` and its slot has
    /// not started.
    pub async fn cancel(
        &self,
        user_id: UserId,
        registration_id: RegistrationId,
    ) -> Result<(), CancellationError> {
        let registration = self
            .registrations
            .find_owned(registration_id, user_id)
            .await
            .map_err(CancellationError::Transient)?
            .ok_or(CancellationError::NotFound)?;

        let slot = self
            .slots
            .find_slot(registration.slot_id)
            .await
            .map_err(CancellationError::Transient)?
            .ok_or(CancellationError::NotFound)?;

        if slot.starts_at(self.offset) < self.clock.now() {
            return Err(CancellationError::SlotAlreadyPassed);
        }

        let deleted = self
            .registrations
            .delete(registration_id, user_id)
            .await
            .map_err(CancellationError::Transient)?;

        if deleted == 0 {
            // Raced with another cancellation of the same row.
            debug!(registration_id = %registration_id, "Registration already gone");
        }

        info!(
            registration_id = %registration_id,
            user_id = %user_id,
            slot_id = %slot.id,
            "Registration cancelled"
        );
        Ok(())
    }
}
