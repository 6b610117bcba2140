use super::{
    CONTENT_SEQ, COURSE_CONTENT_TABLE, EntitlementStore, StorageError, StorageResult,
};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::{ContentType, CourseContent};

/// Validated content item for one course
#[derive(Debug, Clone)]
pub struct NewCourseContent {
    pub title: String,
    pub content_type: ContentType,
    pub content: String,
    pub duration: Option<u32>,
    pub order: u32,
}

impl EntitlementStore {
    /// Add a lesson at position `order` of a course
    ///
    /// `order` must lie in `1..=course.lessons` and be free.
    pub fn create_course_content(
        &self,
        course_id: i64,
        new: NewCourseContent,
    ) -> StorageResult<CourseContent> {
        let txn = self.begin_write()?;
        let course = self
            .get_course_txn(&txn, course_id)?
            .ok_or(StorageError::CourseNotFound(course_id))?;
        if new.order == 0 || new.order > course.lessons {
            return Err(StorageError::ContentOrderOutOfRange {
                order: new.order,
                lessons: course.lessons,
            });
        }

        let id = self.next_id(&txn, CONTENT_SEQ)?;
        let item = CourseContent {
            id,
            course_id,
            title: new.title,
            content_type: new.content_type,
            content: new.content,
            duration: new.duration,
            order: new.order,
        };
        {
            let mut table = txn.open_table(COURSE_CONTENT_TABLE)?;
            if table.get((course_id, new.order))?.is_some() {
                return Err(StorageError::ContentOrderTaken {
                    course_id,
                    order: new.order,
                });
            }
            let value = serde_json::to_vec(&item)?;
            table.insert((course_id, new.order), value.as_slice())?;
        }
        txn.commit()?;
        Ok(item)
    }

    /// A course's lessons in `order`
    pub fn list_course_content(&self, course_id: i64) -> StorageResult<Vec<CourseContent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COURSE_CONTENT_TABLE)?;
        let mut items = Vec::new();
        for result in table.range((course_id, 0)..=(course_id, u32::MAX))? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Highest lesson position holding content, 0 when there is none
    pub fn max_content_order(&self, course_id: i64) -> StorageResult<u32> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COURSE_CONTENT_TABLE)?;
        last_order(&table, course_id)
    }

    pub fn max_content_order_txn(&self, txn: &WriteTransaction, course_id: i64) -> StorageResult<u32> {
        let table = txn.open_table(COURSE_CONTENT_TABLE)?;
        last_order(&table, course_id)
    }
}

fn last_order(
    table: &impl ReadableTable<(i64, u32), &'static [u8]>,
    course_id: i64,
) -> StorageResult<u32> {
    let last = table
        .range((course_id, 0)..=(course_id, u32::MAX))?
        .next_back()
        .transpose()?;
    Ok(last.map(|(key, _)| key.value().1).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CourseCreate;

    fn store_with_course(lessons: u32) -> (EntitlementStore, i64) {
        let store = EntitlementStore::open_in_memory().unwrap();
        let course = store
            .create_course(CourseCreate {
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
                level: "Beginner".into(),
                is_featured: false,
                is_published: true,
                image: String::new(),
                badge: None,
            })
            .unwrap();
        (store, course.id)
    }

    fn lesson(order: u32) -> NewCourseContent {
        NewCourseContent {
            title: format!("Lesson {order}"),
            content_type: ContentType::Text,
            content: "# Notes".into(),
            duration: None,
            order,
        }
    }

    #[test]
    fn test_content_listed_in_order() {
        let (store, course_id) = store_with_course(5);
        for order in [3, 1, 2] {
            store.create_course_content(course_id, lesson(order)).unwrap();
        }
        let orders: Vec<u32> = store
            .list_course_content(course_id)
            .unwrap()
            .iter()
            .map(|c| c.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(store.max_content_order(course_id).unwrap(), 3);
    }

    #[test]
    fn test_content_scoped_to_course() {
        let (store, course_id) = store_with_course(5);
        store.create_course_content(course_id, lesson(1)).unwrap();
        assert!(store.list_course_content(course_id + 1).unwrap().is_empty());
        assert_eq!(store.max_content_order(course_id + 1).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_position_is_rejected() {
        let (store, course_id) = store_with_course(5);
        store.create_course_content(course_id, lesson(2)).unwrap();
        let err = store.create_course_content(course_id, lesson(2)).unwrap_err();
        assert!(matches!(err, StorageError::ContentOrderTaken { order: 2, .. }));
        assert_eq!(store.list_course_content(course_id).unwrap().len(), 1);
    }

    #[test]
    fn test_position_outside_course() {
        let (store, course_id) = store_with_course(2);
        for order in [0, 3] {
            let err = store.create_course_content(course_id, lesson(order)).unwrap_err();
            assert!(matches!(err, StorageError::ContentOrderOutOfRange { lessons: 2, .. }));
        }
    }

    #[test]
    fn test_unknown_course() {
        let (store, _) = store_with_course(2);
        let err = store.create_course_content(999, lesson(1)).unwrap_err();
        assert!(matches!(err, StorageError::CourseNotFound(999)));
    }
}
