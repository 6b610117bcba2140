//! Course Content Model

use serde::{Deserialize, Serialize};

/// Kind of content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Text,
    Quiz,
}

/// One lesson of a course
///
/// `order` is the lesson number: 1-based, unique within the course, and the
/// same number progress tracking records as completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Video URL, markdown body or quiz definition
    pub content: String,
    /// Seconds, videos only
    pub duration: Option<u32>,
    pub order: u32,
}

/// Create content payload (course id comes from the path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContentCreate {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub content: Option<String>,
    pub duration: Option<u32>,
    pub order: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_wire_names() {
        let item = CourseContent {
            id: 1,
            course_id: 7,
            title: "Welcome".into(),
            content_type: ContentType::Video,
            content: "https://cdn.example/welcome.mp4".into(),
            duration: Some(320),
            order: 1,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["courseId"], 7);
        assert_eq!(json["order"], 1);
    }

    #[test]
    fn test_create_payload_rejects_unknown_type() {
        let err = serde_json::from_str::<CourseContentCreate>(r#"{"type":"podcast"}"#);
        assert!(err.is_err());
    }
}
