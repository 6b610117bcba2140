//! Course Model

use serde::{Deserialize, Serialize};

/// Course entity
///
/// `price` and `original_price` are integer minor currency units (paise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor_name: String,
    pub instructor_title: String,
    pub price: i64,
    pub original_price: i64,
    /// Display duration, e.g. "8 weeks"
    pub duration: String,
    /// Number of lessons, always > 0
    pub lessons: u32,
    pub level: String,
    pub is_featured: bool,
    pub is_published: bool,
    pub image: String,
    pub badge: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Course {
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            slug: self.slug.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            lessons: self.lessons,
            instructor_name: self.instructor_name.clone(),
        }
    }
}

/// Compact course view embedded in entitlement listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub lessons: u32,
    pub instructor_name: String,
}

/// Create course payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreate {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor_name: String,
    pub instructor_title: String,
    pub price: i64,
    pub original_price: i64,
    pub duration: String,
    pub lessons: u32,
    pub level: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    pub image: String,
    pub badge: Option<String>,
}

/// Update course payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_title: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub duration: Option<String>,
    pub lessons: Option<u32>,
    pub level: Option<String>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub image: Option<String>,
    pub badge: Option<String>,
}
