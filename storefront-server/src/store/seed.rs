//! Sample catalog for development databases

use super::{EntitlementStore, StorageResult};
use shared::models::CourseCreate;

struct SampleCourse {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    instructor_name: &'static str,
    instructor_title: &'static str,
    price: i64,
    original_price: i64,
    duration: &'static str,
    lessons: u32,
    level: &'static str,
    image: &'static str,
    badge: Option<&'static str>,
}

const SAMPLE_COURSES: &[SampleCourse] = &[
    SampleCourse {
        slug: "student-money-making",
        title: "Student Money Making",
        description: "Learn how to earn money while studying without compromising your academics.",
        category: "money-making",
        instructor_name: "Alex Morgan",
        instructor_title: "Student Entrepreneur",
        price: 499900,
        original_price: 999900,
        duration: "8 weeks",
        lessons: 24,
        level: "beginner",
        image: "https://images.unsplash.com/photo-1554224155-6726b3ff858f",
        badge: Some("BESTSELLER"),
    },
    SampleCourse {
        slug: "business-starter",
        title: "Business Starter",
        description: "Launch your first business with proven frameworks for success and growth.",
        category: "business",
        instructor_name: "James Wilson",
        instructor_title: "Serial Entrepreneur",
        price: 599900,
        original_price: 1199900,
        duration: "10 weeks",
        lessons: 32,
        level: "intermediate",
        image: "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40",
        badge: Some("POPULAR"),
    },
    SampleCourse {
        slug: "investing-mastery",
        title: "Investing Mastery",
        description: "Master stock markets, crypto, real estate, and alternative investment strategies.",
        category: "investing",
        instructor_name: "Sophia Chen",
        instructor_title: "Investment Strategist",
        price: 799900,
        original_price: 1499900,
        duration: "12 weeks",
        lessons: 40,
        level: "advanced",
        image: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3",
        badge: None,
    },
    SampleCourse {
        slug: "ai-productivity",
        title: "AI Productivity",
        description: "Leverage AI tools to 10x your productivity and automate repetitive tasks.",
        category: "ai-mastery",
        instructor_name: "Robert Martinez",
        instructor_title: "AI Specialist",
        price: 899900,
        original_price: 1699900,
        duration: "6 weeks",
        lessons: 28,
        level: "intermediate",
        image: "https://images.unsplash.com/photo-1677442136019-21780ecad995",
        badge: Some("NEW"),
    },
];

/// Insert the sample courses if the catalog is empty
///
/// Returns the number of courses inserted.
pub fn seed_sample_courses(store: &EntitlementStore) -> StorageResult<usize> {
    if !store.list_courses()?.is_empty() {
        return Ok(0);
    }

    for sample in SAMPLE_COURSES {
        store.create_course(CourseCreate {
            slug: sample.slug.to_string(),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            category: sample.category.to_string(),
            instructor_name: sample.instructor_name.to_string(),
            instructor_title: sample.instructor_title.to_string(),
            price: sample.price,
            original_price: sample.original_price,
            duration: sample.duration.to_string(),
            lessons: sample.lessons,
            level: sample.level.to_string(),
            is_featured: true,
            is_published: true,
            image: sample.image.to_string(),
            badge: sample.badge.map(String::from),
        })?;
    }

    tracing::info!(count = SAMPLE_COURSES.len(), "Seeded sample courses");
    Ok(SAMPLE_COURSES.len())
}
