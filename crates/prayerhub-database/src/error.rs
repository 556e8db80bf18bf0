//! Store-level errors.
//!
//! The admission loop needs to tell a uniqueness violation apart from every
//! other failure, so repositories classify driver errors here instead of
//! mapping straight to [`AppError`].

use thiserror::Error;

use prayerhub_core::error::{AppError, ErrorKind};

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint '{constraint}' violated")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: String,
    },
    /// Any other store failure.
    #[error("store failure: {message}")]
    Backend {
        /// Short description of the failed operation.
        message: String,
        /// Underlying driver error, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Build a backend error without a driver source.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Classify a sqlx error raised while performing `context`.
    pub fn from_sqlx(context: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                };
            }
        }
        Self::Backend {
            message: context.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Whether this is a uniqueness violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = match &err {
            StoreError::UniqueViolation { constraint } => {
                return AppError::conflict(format!("Duplicate entry ({constraint})"));
            }
            StoreError::Backend { message, .. } => message.clone(),
        };
        AppError::with_source(ErrorKind::Database, message, err)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
