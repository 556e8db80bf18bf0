//! Shared administrator code.
//!
//! Only the SHA-256 digest of the configured code is kept in memory.
//! Candidates are compared digest against digest in constant time.

use sha2::{Digest, Sha256};

use prayerhub_core::error::AppError;

/// Length of the logged fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 4;

/// The configured administrator code.
#[derive(Clone)]
pub struct AdminCode {
    digest: Option<[u8; 32]>,
}

impl std::fmt::Debug for AdminCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCode")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

impl AdminCode {
    /// Wrap the configured code. An empty code disables administration.
    pub fn new(code: &str) -> Self {
        Self {
            digest: (!code.is_empty()).then(|| digest(code)),
        }
    }

    /// Whether a code is configured.
    pub fn is_enabled(&self) -> bool {
        self.digest.is_some()
    }

    /// Truncated hex digest, safe to log.
    pub fn fingerprint(&self) -> Option<String> {
        self.digest
            .map(|d| hex::encode(&d[..FINGERPRINT_BYTES]))
    }

    /// Check `candidate` against the configured code.
    pub fn verify(&self, candidate: &str) -> Result<(), AppError> {
        let Some(expected) = self.digest else {
            return Err(AppError::configuration("서버 설정 오류입니다."));
        };
        if candidate.is_empty() {
            return Err(AppError::validation("관리자 코드를 입력해주세요."));
        }

        let actual = digest(candidate);
        let diff = expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if diff == 0 {
            Ok(())
        } else {
            Err(AppError::unauthorized("올바르지 않은 관리자 코드입니다."))
        }
    }
}

fn digest(code: &str) -> [u8; 32] {
    Sha256::digest(code.as_bytes()).into()
}
