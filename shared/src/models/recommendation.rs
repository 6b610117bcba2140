//! Course recommendation quiz answers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Money,
    Business,
    Investing,
    Productivity,
}

/// Weekly time the learner can spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeCommitment {
    Minimal,
    Moderate,
    Significant,
    Extensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Experience {
    Beginner,
    SomeKnowledge,
    Intermediate,
    Advanced,
}

/// `POST /recommendations` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub goal: Option<Goal>,
    pub time: Option<TimeCommitment>,
    pub experience: Option<Experience>,
}
