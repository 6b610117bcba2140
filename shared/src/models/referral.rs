//! Referral Model

use serde::{Deserialize, Serialize};

/// Referral code bound to (user, course)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub code: String,
    /// Non-decreasing count of purchases attributed to this code
    pub used_count: u64,
    pub created_at: i64,
}

/// `POST /referrals` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReferralRequest {
    pub user_id: Option<i64>,
    pub course_id: Option<i64>,
}

/// `POST /referrals` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReferralResponse {
    pub code: String,
}
