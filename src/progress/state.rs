//! Lesson completion state

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Completion flags per lesson, per course
///
/// Serialized as `{"<courseId>": {"<lessonId>": bool}}`. A missing key means
/// not complete; marking a lesson incomplete keeps its key with `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonCompletionState {
    courses: HashMap<String, HashMap<String, bool>>,
}

impl LessonCompletionState {
    /// Record a lesson flag
    pub fn set(&mut self, course_id: &str, lesson_id: &str, complete: bool) {
        self.courses
            .entry(course_id.to_string())
            .or_default()
            .insert(lesson_id.to_string(), complete);
    }

    /// Whether a lesson is complete (false when never recorded)
    pub fn is_complete(&self, course_id: &str, lesson_id: &str) -> bool {
        self.courses.get(course_id).and_then(|c| c.get(lesson_id)).copied().unwrap_or(false)
    }

    /// Whether a flag exists for the lesson, true or false
    pub fn is_recorded(&self, course_id: &str, lesson_id: &str) -> bool {
        self.courses.get(course_id).is_some_and(|c| c.contains_key(lesson_id))
    }

    /// Flags recorded for a course
    pub fn course(&self, course_id: &str) -> Option<&HashMap<String, bool>> {
        self.courses.get(course_id)
    }

    /// Number of lessons marked complete in a course
    pub fn completed_in(&self, course_id: &str) -> usize {
        self.courses.get(course_id).map_or(0, |c| c.values().filter(|&&done| done).count())
    }

    /// Iterate over every course bucket
    pub fn courses(&self) -> impl Iterator<Item = (&str, &HashMap<String, bool>)> {
        self.courses.iter().map(|(id, lessons)| (id.as_str(), lessons))
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_lesson_is_incomplete() {
        let state = LessonCompletionState::default();
        assert!(!state.is_complete("1", "1"));
        assert!(!state.is_recorded("1", "1"));
        assert_eq!(state.completed_in("1"), 0);
    }

    #[test]
    fn incomplete_flag_keeps_key() {
        let mut state = LessonCompletionState::default();
        state.set("c1", "1", true);
        state.set("c1", "1", false);

        assert!(!state.is_complete("c1", "1"));
        assert!(state.is_recorded("c1", "1"));
        assert_eq!(state.course("c1").map(|c| c.len()), Some(1));
    }

    #[test]
    fn completed_in_counts_true_flags_only() {
        let mut state = LessonCompletionState::default();
        state.set("c1", "1", true);
        state.set("c1", "2", false);
        state.set("c1", "3", true);
        state.set("c2", "1", true);

        assert_eq!(state.completed_in("c1"), 2);
        assert_eq!(state.completed_in("c2"), 1);
    }

    #[test]
    fn deserializes_original_layout() {
        let json = r#"{"1": {"1": true, "2": false}, "3": {}}"#;
        let state: LessonCompletionState = serde_json::from_str(json).unwrap();

        assert!(state.is_complete("1", "1"));
        assert!(state.is_recorded("1", "2"));
        assert_eq!(state.courses().count(), 2);
    }
}
