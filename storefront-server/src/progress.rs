//! Lesson progress on granted entitlements
//!
//! Completion is monotonic: submitted lessons are merged into the stored set
//! and never removed, except lessons a course edit has cut off, which are
//! dropped on the next recording.

use crate::store::{EntitlementStore, StorageError};
use shared::error::{AppError, ErrorCode};
use shared::models::Entitlement;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Entitlement not found: {0}")]
    EntitlementNotFound(i64),

    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    #[error("Lesson {lesson} out of range 1..={lessons}")]
    LessonOutOfRange { lesson: u32, lessons: u32 },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::EntitlementNotFound(id) => {
                AppError::new(ErrorCode::EntitlementNotFound).with_detail("entitlementId", id)
            }
            ProgressError::CourseNotFound(id) => {
                AppError::new(ErrorCode::CourseNotFound).with_detail("courseId", id)
            }
            ProgressError::LessonOutOfRange { lesson, lessons } => {
                AppError::with_message(
                    ErrorCode::LessonOutOfRange,
                    format!("Lesson {lesson} out of range 1..={lessons}"),
                )
                .with_detail("lesson", lesson)
                .with_detail("lessons", lessons)
            }
            ProgressError::Storage(e) => e.into(),
        }
    }
}

/// Whole percent of `lessons` covered by `completed`, capped at 100
pub fn percent_complete(completed: usize, lessons: u32) -> u8 {
    if lessons == 0 {
        return 0;
    }
    let percent = (completed as u64 * 100) / u64::from(lessons);
    percent.min(100) as u8
}

/// Mark `lessons` completed on an entitlement and recompute its progress
pub fn record_progress(
    store: &EntitlementStore,
    entitlement_id: i64,
    lessons: &[u32],
) -> Result<Entitlement, ProgressError> {
    let txn = store.begin_write()?;
    let entitlement = store
        .get_entitlement_txn(&txn, entitlement_id)?
        .ok_or(ProgressError::EntitlementNotFound(entitlement_id))?;
    let course = store
        .get_course_txn(&txn, entitlement.course_id)?
        .ok_or(ProgressError::CourseNotFound(entitlement.course_id))?;

    if let Some(&lesson) = lessons
        .iter()
        .find(|&&l| l == 0 || l > course.lessons)
    {
        return Err(ProgressError::LessonOutOfRange {
            lesson,
            lessons: course.lessons,
        });
    }

    let mut completed: BTreeSet<u32> = entitlement.completed_lessons;
    completed.retain(|&l| l <= course.lessons);
    completed.extend(lessons.iter().copied());
    let progress = percent_complete(completed.len(), course.lessons);

    let updated = store.update_progress(&txn, entitlement_id, completed, progress)?;
    txn.commit().map_err(StorageError::from)?;

    tracing::debug!(
        entitlement_id,
        completed = updated.completed_lessons.len(),
        progress = updated.progress,
        "Progress recorded"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Course;

    fn setup(lessons: u32) -> (EntitlementStore, i64) {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        store
            .insert_course(
                &txn,
                &Course {
                    id: 7,
                    slug: "ai-productivity".into(),
                    title: "AI Productivity".into(),
                    description: String::new(),
                    category: "productivity".into(),
                    instructor_name: "Dr. Rachel Kim".into(),
                    instructor_title: "AI Researcher".into(),
                    price: 299900,
                    original_price: 599900,
                    duration: "4 weeks".into(),
                    lessons,
                    level: "beginner".into(),
                    is_featured: false,
                    is_published: true,
                    image: String::new(),
                    badge: None,
                    created_at: 0,
                    updated_at: 0,
                },
            )
            .unwrap();
        let (entitlement, _) = store.create_entitlement(&txn, 42, 7, None).unwrap();
        txn.commit().unwrap();
        (store, entitlement.id)
    }

    #[test]
    fn test_percent_complete() {
        assert_eq!(percent_complete(0, 20), 0);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(20, 20), 100);
        assert_eq!(percent_complete(30, 20), 100);
        assert_eq!(percent_complete(5, 0), 0);
    }

    #[test]
    fn test_record_progress_merges_lessons() {
        let (store, id) = setup(20);
        let first = record_progress(&store, id, &[1, 2, 3]).unwrap();
        assert_eq!(first.progress, 15);

        // already-completed lessons are not counted twice
        let second = record_progress(&store, id, &[3, 4]).unwrap();
        assert_eq!(
            second.completed_lessons.iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(second.progress, 20);
        assert_eq!(store.get_entitlement(id).unwrap().unwrap(), second);
    }

    #[test]
    fn test_record_progress_full_course() {
        let (store, id) = setup(4);
        let done = record_progress(&store, id, &[1, 2, 3, 4]).unwrap();
        assert_eq!(done.progress, 100);
    }

    #[test]
    fn test_record_progress_after_course_shrinks() {
        let (store, id) = setup(10);
        record_progress(&store, id, &[7, 8, 9, 10]).unwrap();

        store
            .update_course(
                7,
                shared::models::CourseUpdate {
                    lessons: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = record_progress(&store, id, &[1]).unwrap();
        assert_eq!(
            updated.completed_lessons.iter().copied().collect::<Vec<_>>(),
            vec![1]
        );
        assert_eq!(updated.progress, 20);
    }

    #[test]
    fn test_record_progress_rejects_out_of_range() {
        let (store, id) = setup(4);
        for lesson in [0, 5] {
            let err = record_progress(&store, id, &[1, lesson]).unwrap_err();
            assert!(matches!(err, ProgressError::LessonOutOfRange { lessons: 4, .. }));
        }
        // nothing was written
        assert!(store.get_entitlement(id).unwrap().unwrap().completed_lessons.is_empty());
    }

    #[test]
    fn test_record_progress_unknown_entitlement() {
        let (store, _) = setup(4);
        let err = record_progress(&store, 999, &[1]).unwrap_err();
        assert!(matches!(err, ProgressError::EntitlementNotFound(999)));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::EntitlementNotFound);
    }
}
