use super::{
    COURSE_SEQ, COURSES_BY_SLUG_TABLE, COURSES_TABLE, EntitlementStore, StorageError,
    StorageResult, all_json, get_json,
};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::{Course, CourseCreate, CourseUpdate};
use shared::util::now_millis;

impl EntitlementStore {
    /// Add a course to the catalog, allocating its id
    pub fn create_course(&self, new: CourseCreate) -> StorageResult<Course> {
        let txn = self.begin_write()?;
        let id = self.next_id(&txn, COURSE_SEQ)?;
        let now = now_millis();
        let course = Course {
            id,
            slug: new.slug,
            title: new.title,
            description: new.description,
            category: new.category,
            instructor_name: new.instructor_name,
            instructor_title: new.instructor_title,
            price: new.price,
            original_price: new.original_price,
            duration: new.duration,
            lessons: new.lessons,
            level: new.level,
            is_featured: new.is_featured,
            is_published: new.is_published,
            image: new.image,
            badge: new.badge,
            created_at: now,
            updated_at: now,
        };
        self.insert_course(&txn, &course)?;
        txn.commit()?;
        Ok(course)
    }

    /// Insert a fully formed course (within transaction)
    pub fn insert_course(&self, txn: &WriteTransaction, course: &Course) -> StorageResult<()> {
        {
            let mut by_slug = txn.open_table(COURSES_BY_SLUG_TABLE)?;
            if let Some(existing) = by_slug.get(course.slug.as_str())?.map(|g| g.value())
                && existing != course.id
            {
                return Err(StorageError::SlugTaken(course.slug.clone()));
            }
            by_slug.insert(course.slug.as_str(), course.id)?;
        }
        self.put_course(txn, course)?;
        self.bump_sequence(txn, COURSE_SEQ, course.id)
    }

    fn put_course(&self, txn: &WriteTransaction, course: &Course) -> StorageResult<()> {
        let mut table = txn.open_table(COURSES_TABLE)?;
        let value = serde_json::to_vec(course)?;
        table.insert(course.id, value.as_slice())?;
        Ok(())
    }

    /// Apply an admin edit. Existing orders keep their price snapshot.
    ///
    /// `lessons` cannot drop below the highest lesson that has content.
    pub fn update_course(&self, id: i64, update: CourseUpdate) -> StorageResult<Course> {
        let txn = self.begin_write()?;
        let mut course = self
            .get_course_txn(&txn, id)?
            .ok_or(StorageError::CourseNotFound(id))?;

        if let Some(v) = update.title {
            course.title = v;
        }
        if let Some(v) = update.description {
            course.description = v;
        }
        if let Some(v) = update.category {
            course.category = v;
        }
        if let Some(v) = update.instructor_name {
            course.instructor_name = v;
        }
        if let Some(v) = update.instructor_title {
            course.instructor_title = v;
        }
        if let Some(v) = update.price {
            course.price = v;
        }
        if let Some(v) = update.original_price {
            course.original_price = v;
        }
        if let Some(v) = update.duration {
            course.duration = v;
        }
        if let Some(v) = update.lessons {
            let max_order = self.max_content_order_txn(&txn, id)?;
            if v < max_order {
                return Err(StorageError::LessonsBelowContent {
                    course_id: id,
                    lessons: v,
                    max_order,
                });
            }
            course.lessons = v;
        }
        if let Some(v) = update.level {
            course.level = v;
        }
        if let Some(v) = update.is_featured {
            course.is_featured = v;
        }
        if let Some(v) = update.is_published {
            course.is_published = v;
        }
        if let Some(v) = update.image {
            course.image = v;
        }
        if update.badge.is_some() {
            course.badge = update.badge;
        }
        course.updated_at = now_millis();

        self.put_course(&txn, &course)?;
        txn.commit()?;
        Ok(course)
    }

    pub fn get_course(&self, id: i64) -> StorageResult<Option<Course>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COURSES_TABLE)?;
        get_json(&table, id)
    }

    pub fn get_course_txn(&self, txn: &WriteTransaction, id: i64) -> StorageResult<Option<Course>> {
        let table = txn.open_table(COURSES_TABLE)?;
        get_json(&table, id)
    }

    pub fn find_course_by_slug(&self, slug: &str) -> StorageResult<Option<Course>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(COURSES_BY_SLUG_TABLE)?;
        let Some(id) = index.get(slug)?.map(|g| g.value()) else {
            return Ok(None);
        };
        let table = read_txn.open_table(COURSES_TABLE)?;
        get_json(&table, id)
    }

    /// All courses, published or not, in id order
    pub fn list_courses(&self) -> StorageResult<Vec<Course>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COURSES_TABLE)?;
        all_json(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_create(slug: &str, price: i64) -> CourseCreate {
        CourseCreate {
            slug: slug.to_string(),
            title: format!("Course {slug}"),
            description: "desc".to_string(),
            category: "business".to_string(),
            instructor_name: "Instructor".to_string(),
            instructor_title: "Founder".to_string(),
            price,
            original_price: price * 2,
            duration: "8 weeks".to_string(),
            lessons: 10,
            level: "Beginner".to_string(),
            is_featured: false,
            is_published: true,
            image: "/img.png".to_string(),
            badge: None,
        }
    }

    #[test]
    fn test_create_and_find_by_slug() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let course = store.create_course(course_create("intro", 79900)).unwrap();
        assert_eq!(store.find_course_by_slug("intro").unwrap(), Some(course.clone()));
        assert_eq!(store.get_course(course.id).unwrap(), Some(course));
        assert!(store.find_course_by_slug("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let store = EntitlementStore::open_in_memory().unwrap();
        store.create_course(course_create("intro", 100)).unwrap();
        let err = store.create_course(course_create("intro", 200)).unwrap_err();
        assert!(matches!(err, StorageError::SlugTaken(_)));
        assert_eq!(store.list_courses().unwrap().len(), 1);
    }

    #[test]
    fn test_update_course_fields() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let course = store.create_course(course_create("intro", 100)).unwrap();
        let updated = store
            .update_course(
                course.id,
                CourseUpdate {
                    price: Some(150),
                    is_published: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 150);
        assert!(!updated.is_published);
        assert_eq!(updated.slug, "intro");
    }

    #[test]
    fn test_lessons_cannot_shrink_below_content() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let course = store.create_course(course_create("intro", 100)).unwrap();
        store
            .create_course_content(
                course.id,
                crate::store::NewCourseContent {
                    title: "Lesson 8".into(),
                    content_type: shared::models::ContentType::Video,
                    content: "https://cdn.example/8.mp4".into(),
                    duration: Some(600),
                    order: 8,
                },
            )
            .unwrap();

        let shrink = |lessons| CourseUpdate {
            lessons: Some(lessons),
            ..Default::default()
        };
        let err = store.update_course(course.id, shrink(5)).unwrap_err();
        assert!(matches!(err, StorageError::LessonsBelowContent { max_order: 8, .. }));
        assert_eq!(store.get_course(course.id).unwrap().unwrap().lessons, 10);

        assert_eq!(store.update_course(course.id, shrink(8)).unwrap().lessons, 8);
    }
}
