//! Lesson progress tracking
//!
//! Per-identity lesson completion flags and the metrics derived from them.

pub mod state;
pub mod store;
pub mod summary;

pub use state::LessonCompletionState;
pub use store::ProgressStore;
pub use summary::{
    CourseProgressSummary, OverallProgressSummary, ProgressSummary, catalog_course_progress,
    catalog_overall_progress, course_progress, overall_progress,
};
