//! Entitlement Model (granted access of one user to one course)

use super::course::CourseSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entitlement entity, at most one per (user, course)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub purchased_at: i64,
    /// Completed lesson numbers (1-based)
    pub completed_lessons: BTreeSet<u32>,
    /// 0..=100
    pub progress: u8,
    /// Referral code used for the purchase that granted this entitlement
    pub referral_code: Option<String>,
    /// Owner of that referral code
    pub referred_by: Option<i64>,
}

/// Entitlement with embedded course summary (user dashboard listing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementWithCourse {
    #[serde(flatten)]
    pub entitlement: Entitlement,
    pub course: CourseSummary,
}

/// `POST /entitlements/{id}/progress` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub completed_lessons: Option<Vec<u32>>,
}
