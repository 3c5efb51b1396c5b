//! Completion metrics derived from lesson state
//!
//! Two families of functions live here. [`course_progress`] and
//! [`overall_progress`] count raw flags: stale lesson ids still count, so
//! `completed` may exceed `total` and the percentage may exceed 100, and the
//! overall denominator is the number of lessons ever recorded. The
//! `catalog_*` variants only count lessons that exist in the catalog and
//! always divide by catalog totals.

use serde::Serialize;

use super::state::LessonCompletionState;
use crate::catalog::{Catalog, Course};

/// Completed/total counts with a rounded percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Progress within one course
pub type CourseProgressSummary = ProgressSummary;

/// Progress across all courses
pub type OverallProgressSummary = ProgressSummary;

impl ProgressSummary {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total, percentage: percentage(completed, total) }
    }

    /// Cap `completed` at `total` and recompute the percentage
    pub fn clamped(self) -> Self {
        Self::new(self.completed.min(self.total), self.total)
    }

    /// Started but not finished
    pub fn is_in_progress(&self) -> bool {
        self.percentage > 0 && self.percentage < 100
    }

    /// Every lesson done
    pub fn is_finished(&self) -> bool {
        self.percentage == 100
    }
}

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u64, whole as u64);
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Raw progress for a course against a catalog lesson total
pub fn course_progress(
    state: &LessonCompletionState,
    course_id: &str,
    total_lessons: usize,
) -> CourseProgressSummary {
    ProgressSummary::new(state.completed_in(course_id), total_lessons)
}

/// Raw progress across every recorded course; the denominator is the number
/// of recorded lesson flags, true or false
pub fn overall_progress(state: &LessonCompletionState) -> OverallProgressSummary {
    let (completed, total) = state.courses().fold((0, 0), |(completed, total), (_, lessons)| {
        (completed + lessons.values().filter(|&&done| done).count(), total + lessons.len())
    });
    ProgressSummary::new(completed, total)
}

/// Progress for a course counting only lessons the catalog still lists
pub fn catalog_course_progress(state: &LessonCompletionState, course: &Course) -> CourseProgressSummary {
    let key = course.key();
    let ids = course.lesson_ids();

    if ids.is_empty() {
        return course_progress(state, &key, course.total_lessons()).clamped();
    }

    let completed = ids.iter().filter(|id| state.is_complete(&key, id)).count();
    ProgressSummary::new(completed, course.total_lessons())
}

/// Progress across the whole catalog, using catalog totals as denominator
pub fn catalog_overall_progress(state: &LessonCompletionState, catalog: &Catalog) -> OverallProgressSummary {
    let (completed, total) = catalog
        .courses()
        .iter()
        .map(|course| catalog_course_progress(state, course))
        .fold((0, 0), |(completed, total), s| (completed + s.completed, total + s.total));
    ProgressSummary::new(completed, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Lesson, Module};
    use pretty_assertions::assert_eq;

    fn course(id: u32, lesson_ids: &[&str], declared: u32) -> Course {
        Course {
            id,
            title: "Course".into(),
            category: "Excel".into(),
            description: String::new(),
            full_description: None,
            level: "Beginner".into(),
            lessons: declared,
            image: String::new(),
            last_updated: None,
            language: None,
            modules: if lesson_ids.is_empty() {
                vec![]
            } else {
                vec![Module {
                    id: 1,
                    title: "Module".into(),
                    lessons: lesson_ids
                        .iter()
                        .map(|id| Lesson { id: id.to_string(), title: String::new() })
                        .collect(),
                }]
            },
            features: None,
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(6, 5), 120);
    }

    #[test]
    fn three_of_five_is_sixty_percent() {
        let mut state = LessonCompletionState::default();
        for lesson in ["1", "2", "3"] {
            state.set("c1", lesson, true);
        }

        assert_eq!(
            course_progress(&state, "c1", 5),
            ProgressSummary { completed: 3, total: 5, percentage: 60 }
        );
    }

    #[test]
    fn zero_total_is_zero_percent() {
        let mut state = LessonCompletionState::default();
        state.set("c1", "1", true);

        assert_eq!(course_progress(&state, "c1", 0).percentage, 0);
        assert_eq!(overall_progress(&LessonCompletionState::default()), ProgressSummary::default());
    }

    #[test]
    fn stale_lessons_are_not_clamped() {
        let mut state = LessonCompletionState::default();
        for lesson in ["1", "2", "3", "old-4"] {
            state.set("c1", lesson, true);
        }

        let summary = course_progress(&state, "c1", 3);
        assert_eq!(summary.completed, 4);
        assert_eq!(summary.percentage, 133);
        assert_eq!(summary.clamped(), ProgressSummary { completed: 3, total: 3, percentage: 100 });
    }

    #[test]
    fn overall_divides_by_recorded_keys() {
        let mut state = LessonCompletionState::default();
        state.set("c1", "1", true);
        state.set("c1", "2", false);
        state.set("c2", "1", true);
        state.set("c2", "2", true);

        assert_eq!(overall_progress(&state), ProgressSummary { completed: 3, total: 4, percentage: 75 });
    }

    #[test]
    fn catalog_course_progress_ignores_unknown_lessons() {
        let c = course(1, &["1", "2", "3", "4"], 0);
        let mut state = LessonCompletionState::default();
        state.set("1", "1", true);
        state.set("1", "2", true);
        state.set("1", "gone", true);

        assert_eq!(
            catalog_course_progress(&state, &c),
            ProgressSummary { completed: 2, total: 4, percentage: 50 }
        );
    }

    #[test]
    fn catalog_course_progress_without_modules_uses_declared_total() {
        let c = course(2, &[], 2);
        let mut state = LessonCompletionState::default();
        for lesson in ["a", "b", "c"] {
            state.set("2", lesson, true);
        }

        assert_eq!(
            catalog_course_progress(&state, &c),
            ProgressSummary { completed: 2, total: 2, percentage: 100 }
        );
    }

    #[test]
    fn catalog_overall_uses_catalog_totals() {
        let catalog = Catalog::new(vec![course(1, &["1", "2"], 0), course(2, &["3", "4"], 0)]);
        let mut state = LessonCompletionState::default();
        state.set("1", "1", true);
        state.set("9", "x", true);

        assert_eq!(
            catalog_overall_progress(&state, &catalog),
            ProgressSummary { completed: 1, total: 4, percentage: 25 }
        );
    }

    #[test]
    fn in_progress_and_finished() {
        assert!(ProgressSummary::new(1, 2).is_in_progress());
        assert!(!ProgressSummary::new(0, 2).is_in_progress());
        assert!(ProgressSummary::new(2, 2).is_finished());
        assert!(!ProgressSummary::new(2, 2).is_in_progress());
    }
}
