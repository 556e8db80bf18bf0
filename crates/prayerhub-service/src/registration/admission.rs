//! Registration admission controller.
//!
//! Admission is optimistic. Every attempt re-reads the slot's live count and
//! capacity, refuses when the slot is full, and otherwise inserts. The
//! `(user_id, slot_id)` uniqueness constraint is the only hard guarantee; a
//! uniqueness violation means another request won the race and the attempt
//! is retried after a fixed backoff.
//!
//! The capacity bound is soft: concurrent requests that all read a count
//! below capacity may all insert.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use prayerhub_core::error::{AppError, ErrorKind};
use prayerhub_core::traits::Clock;
use prayerhub_core::types::{SlotId, UserId};
use prayerhub_database::{RegistrationStore, SlotStore, StoreError};
use prayerhub_entity::registration::Registration;
use prayerhub_entity::slot::PrayerSlot;

use super::capacity::CapacityResolver;
use crate::retry::{Attempt, RetryOutcome, RetryPolicy, retry_on_conflict};

/// Why an admission was refused.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The user already holds a registration for this slot.
    #[error("이미 해당 시간대에 신청하셨습니다.")]
    DuplicateRegistration,
    /// The slot does not exist.
    #[error("존재하지 않는 시간대입니다.")]
    SlotNotFound,
    /// The slot's count has reached its capacity.
    #[error("해당 시간대의 신청이 마감되었습니다.")]
    SlotFull,
    /// Every allowed attempt lost a uniqueness race.
    #[error("신청이 몰려 처리하지 못했습니다. 잠시 후 다시 시도해주세요.")]
    ConcurrencyExhausted {
        /// Attempts made.
        attempts: u32,
    },
    /// Any other store failure. Never retried.
    #[error("신청 등록 중 오류가 발생했습니다.")]
    Transient(#[source] StoreError),
}

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        let message = err.to_string();
        match err {
            AdmissionError::DuplicateRegistration
            | AdmissionError::SlotFull
            | AdmissionError::ConcurrencyExhausted { .. } => AppError::conflict(message),
            AdmissionError::SlotNotFound => AppError::not_found(message),
            AdmissionError::Transient(source) => {
                AppError::with_source(ErrorKind::Database, message, source)
            }
        }
    }
}

/// Admits users into slots.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    /// Slot store.
    slots: Arc<dyn SlotStore>,
    /// Registration store.
    registrations: Arc<dyn RegistrationStore>,
    /// Capacity lookup.
    capacity: CapacityResolver,
    /// Time source for backoff.
    clock: Arc<dyn Clock>,
    /// Attempt limit and backoff.
    policy: RetryPolicy,
}

impl AdmissionController {
    /// Creates a new admission controller.
    pub fn new(
        slots: Arc<dyn SlotStore>,
        registrations: Arc<dyn RegistrationStore>,
        capacity: CapacityResolver,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            slots,
            registrations,
            capacity,
            clock,
            policy,
        }
    }

    /// Admit `user_id` into `slot_id`.
    pub async fn admit(
        &self,
        user_id: UserId,
        slot_id: SlotId,
    ) -> Result<Registration, AdmissionError> {
        if self
            .registrations
            .exists(user_id, slot_id)
            .await
            .map_err(AdmissionError::Transient)?
        {
            return Err(AdmissionError::DuplicateRegistration);
        }

        self.load_slot(slot_id).await?;

        let outcome = retry_on_conflict(&self.policy, self.clock.as_ref(), |attempt| {
            self.attempt(slot_id, user_id, attempt)
        })
        .await?;

        match outcome {
            RetryOutcome::Completed { value, attempts } => {
                info!(
                    registration_id = %value.id,
                    user_id = %user_id,
                    slot_id = %slot_id,
                    attempts,
                    "Registration admitted"
                );
                Ok(value)
            }
            RetryOutcome::Exhausted { attempts } => {
                warn!(
                    user_id = %user_id,
                    slot_id = %slot_id,
                    attempts,
                    "Admission retries exhausted"
                );
                Err(AdmissionError::ConcurrencyExhausted { attempts })
            }
        }
    }

    async fn load_slot(&self, slot_id: SlotId) -> Result<PrayerSlot, AdmissionError> {
        self.slots
            .find_slot(slot_id)
            .await
            .map_err(AdmissionError::Transient)?
            .ok_or(AdmissionError::SlotNotFound)
    }

    /// One admission attempt. The slot row (for its override), the live
    /// count and the global setting are all read again here.
    async fn attempt(
        &self,
        slot_id: SlotId,
        user_id: UserId,
        attempt: u32,
    ) -> Result<Attempt<Registration>, AdmissionError> {
        let slot = self.load_slot(slot_id).await?;

        let status = self
            .slots
            .find_status(slot_id)
            .await
            .map_err(AdmissionError::Transient)?
            .ok_or(AdmissionError::SlotNotFound)?;

        let capacity = self
            .capacity
            .capacity_for(&slot)
            .await
            .map_err(AdmissionError::Transient)?;

        let current = status.current_count();
        if capacity.is_reached_by(current) {
            debug!(slot_id = %slot_id, current, ?capacity, attempt, "Slot is full");
            return Err(AdmissionError::SlotFull);
        }

        match self.registrations.insert(user_id, slot_id).await {
            Ok(registration) => Ok(Attempt::Done(registration)),
            Err(err) if err.is_unique_violation() => {
                debug!(slot_id = %slot_id, user_id = %user_id, attempt, "Lost admission race");
                Ok(Attempt::Retry)
            }
            Err(err) => {
                warn!(slot_id = %slot_id, error = %err, "Registration insert failed");
                Err(AdmissionError::Transient(err))
            }
        }
    }
}
