//! Course recommendation quiz
//!
//! Maps quiz answers to a catalog slug through a fixed table. Answer
//! combinations the table does not list fall back to [`DEFAULT_SLUG`].

use shared::models::{Experience, Goal, TimeCommitment};

pub const DEFAULT_SLUG: &str = "student-money-making";

/// Slug of the course recommended for a set of quiz answers
pub fn recommend(goal: Goal, time: TimeCommitment, experience: Experience) -> &'static str {
    use Experience::*;
    use TimeCommitment::*;

    match (goal, time, experience) {
        (Goal::Money, Minimal | Moderate, Beginner | SomeKnowledge) => "student-money-making",
        (Goal::Money, Significant, Intermediate) => "business-starter",
        (Goal::Money, Extensive, Intermediate | Advanced) => "business-starter",

        (Goal::Business, Minimal, Beginner) => "student-money-making",
        (Goal::Business, Moderate, Beginner | SomeKnowledge) => "business-starter",
        (Goal::Business, Significant | Extensive, Intermediate) => "business-starter",
        (Goal::Business, Extensive, Advanced) => "investing-mastery",

        (Goal::Investing, Minimal, Beginner) => "student-money-making",
        (Goal::Investing, Moderate, Beginner | SomeKnowledge) => "investing-mastery",
        (Goal::Investing, Significant | Extensive, Intermediate) => "investing-mastery",
        (Goal::Investing, Extensive, Advanced) => "investing-mastery",

        (Goal::Productivity, Minimal, Beginner) => "ai-productivity",
        (Goal::Productivity, Moderate, Beginner | SomeKnowledge) => "ai-productivity",
        (Goal::Productivity, Significant | Extensive, Intermediate) => "ai-productivity",
        (Goal::Productivity, Extensive, Advanced) => "ai-productivity",

        _ => DEFAULT_SLUG,
    }
}
