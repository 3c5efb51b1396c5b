//! Course catalog model
//!
//! Courses contain ordered modules, modules contain ordered lessons. The JSON
//! shape matches what `/api/courses` serves, so the same types are used on
//! both sides of the wire.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::progress::LessonCompletionState;

/// Seed catalog embedded in the binary
static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/courses.json"))
        .expect("embedded course catalog is valid JSON")
});

/// A single lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson identifier, unique within the catalog
    pub id: String,
    /// Display title
    pub title: String,
}

/// An ordered group of lessons within a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module number within the course
    pub id: u32,
    /// Display title
    pub title: String,
    /// Lessons in reading order
    pub lessons: Vec<Lesson>,
}

/// A course as served by the catalog API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    pub level: String,
    /// Declared lesson count, used when the course lists no module lessons
    pub lessons: u32,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl Course {
    /// Key used for this course in lesson-completion state
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Lesson count: module lessons when present, otherwise the declared count
    pub fn total_lessons(&self) -> usize {
        let from_modules: usize = self.modules.iter().map(|m| m.lessons.len()).sum();
        if from_modules > 0 { from_modules } else { self.lessons as usize }
    }

    /// All lessons in reading order
    pub fn lessons_in_order(&self) -> impl Iterator<Item = &Lesson> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }

    /// Lesson ids in reading order
    pub fn lesson_ids(&self) -> Vec<&str> {
        self.lessons_in_order().map(|l| l.id.as_str()).collect()
    }

    /// Find a lesson by id
    pub fn find_lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons_in_order().find(|l| l.id == lesson_id)
    }

    /// The lesson following `lesson_id` in reading order
    pub fn lesson_after(&self, lesson_id: &str) -> Option<&Lesson> {
        let mut lessons = self.lessons_in_order().skip_while(|l| l.id != lesson_id);
        lessons.next()?;
        lessons.next()
    }

    /// Where to continue reading: the first incomplete lesson, or the first
    /// lesson once everything is complete
    pub fn next_lesson(&self, state: &LessonCompletionState) -> Option<&Lesson> {
        let key = self.key();
        self.lessons_in_order()
            .find(|l| !state.is_complete(&key, &l.id))
            .or_else(|| self.lessons_in_order().next())
    }
}

/// The full course list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// The seed catalog shipped with the application
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Find a course by numeric id
    pub fn find(&self, id: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Find a course by its string key (as used in progress state and URLs)
    pub fn find_by_key(&self, key: &str) -> Option<&Course> {
        key.trim().parse().ok().and_then(|id| self.find(id))
    }

    /// Progress-state key for a user-supplied course key
    ///
    /// Keys naming a catalog course (`"01"`, `" 1"`) map to that course's
    /// [`Course::key`]; anything else is kept as given.
    pub fn canonical_key(&self, key: &str) -> String {
        self.find_by_key(key).map(Course::key).unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str) -> Lesson {
        Lesson { id: id.into(), title: format!("Lesson {}", id) }
    }

    fn course(id: u32, declared: u32, modules: Vec<Vec<&str>>) -> Course {
        Course {
            id,
            title: format!("Course {}", id),
            category: "Excel".into(),
            description: String::new(),
            full_description: None,
            level: "Beginner".into(),
            lessons: declared,
            image: String::new(),
            last_updated: None,
            language: None,
            modules: modules
                .into_iter()
                .enumerate()
                .map(|(i, ids)| Module {
                    id: i as u32 + 1,
                    title: format!("Module {}", i + 1),
                    lessons: ids.into_iter().map(lesson).collect(),
                })
                .collect(),
            features: None,
        }
    }

    #[test]
    fn total_lessons_sums_modules() {
        let c = course(1, 99, vec![vec!["1", "2"], vec!["3"]]);
        assert_eq!(c.total_lessons(), 3);
    }

    #[test]
    fn total_lessons_falls_back_to_declared_count() {
        let c = course(1, 12, vec![]);
        assert_eq!(c.total_lessons(), 12);

        let c = course(1, 7, vec![vec![]]);
        assert_eq!(c.total_lessons(), 7);
    }

    #[test]
    fn next_lesson_is_first_incomplete() {
        let c = course(1, 0, vec![vec!["1", "2"], vec!["3"]]);
        let mut state = LessonCompletionState::default();
        assert_eq!(c.next_lesson(&state).map(|l| l.id.as_str()), Some("1"));

        state.set("1", "1", true);
        state.set("1", "3", true);
        assert_eq!(c.next_lesson(&state).map(|l| l.id.as_str()), Some("2"));
    }

    #[test]
    fn next_lesson_wraps_to_first_when_all_complete() {
        let c = course(1, 0, vec![vec!["1"], vec!["2"]]);
        let mut state = LessonCompletionState::default();
        state.set("1", "1", true);
        state.set("1", "2", true);

        assert_eq!(c.next_lesson(&state).map(|l| l.id.as_str()), Some("1"));
    }

    #[test]
    fn next_lesson_ignores_other_courses() {
        let c = course(2, 0, vec![vec!["1"]]);
        let mut state = LessonCompletionState::default();
        state.set("1", "1", true);

        assert_eq!(c.next_lesson(&state).map(|l| l.id.as_str()), Some("1"));
    }

    #[test]
    fn next_lesson_without_modules_is_none() {
        let c = course(1, 5, vec![]);
        assert!(c.next_lesson(&LessonCompletionState::default()).is_none());
    }

    #[test]
    fn lesson_after_crosses_module_boundaries() {
        let c = course(1, 0, vec![vec!["1", "2"], vec!["3"]]);
        assert_eq!(c.lesson_after("2").map(|l| l.id.as_str()), Some("3"));
        assert!(c.lesson_after("3").is_none());
        assert!(c.lesson_after("missing").is_none());
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.courses().len(), 8);

        let excel = catalog.find(1).unwrap();
        assert_eq!(excel.total_lessons(), 42);
        assert_eq!(excel.lesson_ids().first(), Some(&"1"));
        assert_eq!(excel.find_lesson("26").unwrap().title, "Introduction to VLOOKUP");
    }

    #[test]
    fn find_by_key_parses_ids() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find_by_key("3").map(|c| c.id), Some(3));
        assert!(catalog.find_by_key("abc").is_none());
        assert!(catalog.find_by_key("999").is_none());
    }

    #[test]
    fn canonical_key_normalises_catalog_ids() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.canonical_key("01"), "1");
        assert_eq!(catalog.canonical_key(" 3 "), "3");
        assert_eq!(catalog.canonical_key("1"), "1");
        assert_eq!(catalog.canonical_key("999"), "999");
        assert_eq!(catalog.canonical_key("excel"), "excel");
    }

    #[test]
    fn course_json_uses_camel_case() {
        let json = r#"{
            "id": 9,
            "title": "T",
            "category": "Finance",
            "description": "D",
            "fullDescription": "Long",
            "level": "Advanced",
            "lessons": 3,
            "image": "x",
            "lastUpdated": "2024-01-15",
            "modules": []
        }"#;

        let c: Course = serde_json::from_str(json).unwrap();
        assert_eq!(c.full_description.as_deref(), Some("Long"));
        assert_eq!(c.last_updated.as_deref(), Some("2024-01-15"));
        assert!(c.features.is_none());

        let out = serde_json::to_string(&c).unwrap();
        assert!(out.contains("\"fullDescription\""));
        assert!(!out.contains("\"features\""));
    }
}
