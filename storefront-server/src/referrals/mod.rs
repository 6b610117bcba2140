//! Referral Tracker
//!
//! Issues referral codes bound to (user, course) and counts purchases
//! attributed to them. Attribution is a bonus: an unknown code is reported
//! to the caller but never fails a purchase.

use crate::store::{EntitlementStore, StorageError};
use redb::WriteTransaction;
use shared::error::{AppError, ErrorCode};
use shared::models::Referral;
use shared::util::random_hex;
use thiserror::Error;

/// Attempts at drawing an unused code before giving up
const MAX_CODE_ATTEMPTS: usize = 5;

/// Random bytes in the code suffix (hex encoded)
const CODE_SUFFIX_BYTES: usize = 4;

#[derive(Debug, Error)]
pub enum ReferralError {
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    #[error("Referral code not found: {0}")]
    NotFound(String),

    #[error("No unused referral code after {0} attempts")]
    CodeExhausted(usize),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ReferralError> for AppError {
    fn from(err: ReferralError) -> Self {
        match err {
            ReferralError::UserNotFound(id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("userId", id)
            }
            ReferralError::CourseNotFound(id) => {
                AppError::new(ErrorCode::CourseNotFound).with_detail("courseId", id)
            }
            ReferralError::NotFound(code) => {
                AppError::new(ErrorCode::ReferralNotFound).with_detail("code", code)
            }
            ReferralError::CodeExhausted(attempts) => {
                AppError::new(ErrorCode::ReferralCodeExhausted).with_detail("attempts", attempts)
            }
            ReferralError::Storage(e) => e.into(),
        }
    }
}

/// `{user_id}-{course_id}-{8 hex chars}`
pub fn generate_code(user_id: i64, course_id: i64) -> String {
    format!("{user_id}-{course_id}-{}", random_hex(CODE_SUFFIX_BYTES))
}

#[derive(Clone)]
pub struct ReferralTracker {
    store: EntitlementStore,
}

impl ReferralTracker {
    pub fn new(store: EntitlementStore) -> Self {
        Self { store }
    }

    /// Issue a new referral code for (user, course)
    pub fn issue_code(&self, user_id: i64, course_id: i64) -> Result<Referral, ReferralError> {
        self.issue_code_with(user_id, course_id, generate_code)
    }

    fn issue_code_with(
        &self,
        user_id: i64,
        course_id: i64,
        mut next_code: impl FnMut(i64, i64) -> String,
    ) -> Result<Referral, ReferralError> {
        let txn = self.store.begin_write()?;
        if self.store.get_user_txn(&txn, user_id)?.is_none() {
            return Err(ReferralError::UserNotFound(user_id));
        }
        if self.store.get_course_txn(&txn, course_id)?.is_none() {
            return Err(ReferralError::CourseNotFound(course_id));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = next_code(user_id, course_id);
            match self.store.insert_referral(&txn, user_id, course_id, &code) {
                Ok(referral) => {
                    txn.commit().map_err(StorageError::from)?;
                    tracing::info!(user_id, course_id, code = %referral.code, "Referral code issued");
                    return Ok(referral);
                }
                Err(StorageError::ReferralCodeTaken(_)) => {
                    tracing::debug!(attempt, code = %code, "Referral code collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(user_id, course_id, "Referral code space exhausted");
        Err(ReferralError::CodeExhausted(MAX_CODE_ATTEMPTS))
    }

    /// Count one attributed purchase
    pub fn record_use(&self, code: &str) -> Result<Referral, ReferralError> {
        let txn = self.store.begin_write()?;
        let referral = record_use_in(&self.store, &txn, code)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(referral)
    }

    pub fn get(&self, code: &str) -> Result<Referral, ReferralError> {
        self.store
            .get_referral_by_code(code)?
            .ok_or_else(|| ReferralError::NotFound(code.to_string()))
    }

    pub fn list_for_user(&self, user_id: i64) -> Result<Vec<Referral>, ReferralError> {
        if self.store.get_user(user_id)?.is_none() {
            return Err(ReferralError::UserNotFound(user_id));
        }
        Ok(self.store.list_referrals_for_user(user_id)?)
    }
}

/// Count one attributed purchase inside a caller's transaction
pub fn record_use_in(
    store: &EntitlementStore,
    txn: &WriteTransaction,
    code: &str,
) -> Result<Referral, ReferralError> {
    store
        .increment_referral_use(txn, code)?
        .ok_or_else(|| ReferralError::NotFound(code.to_string()))
}
