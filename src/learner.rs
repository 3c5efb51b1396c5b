//! The signed-in learner
//!
//! [`Learner`] pairs the two stores with the current identity. Switching
//! identity is an explicit call; every query afterwards reads the new
//! identity's records straight from the backend.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, Course};
use crate::identity::Identity;
use crate::practice::{OverallPracticeStats, PracticeStore, TopicProgress, overall_stats};
use crate::progress::{
    CourseProgressSummary, LessonCompletionState, OverallProgressSummary, ProgressStore,
    catalog_course_progress, catalog_overall_progress,
};
use crate::storage::{Backend, StorageResult};

/// Per-course line on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseEntry {
    pub course_id: u32,
    pub title: String,
    pub progress: CourseProgressSummary,
}

/// Everything the dashboard shows for one learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub overall: OverallProgressSummary,
    pub courses: Vec<CourseEntry>,
    pub practice: OverallPracticeStats,
}

impl Dashboard {
    /// Courses started but not finished
    pub fn in_progress(&self) -> impl Iterator<Item = &CourseEntry> {
        self.courses.iter().filter(|c| c.progress.is_in_progress())
    }

    /// Courses with every lesson complete
    pub fn completed(&self) -> impl Iterator<Item = &CourseEntry> {
        self.courses.iter().filter(|c| c.progress.is_finished())
    }
}

/// Lesson and practice progress for whoever is signed in
pub struct Learner {
    identity: Option<Identity>,
    progress: ProgressStore,
    practice: PracticeStore,
}

impl Learner {
    /// A signed-out learner over the given stores
    pub fn new(progress: ProgressStore, practice: PracticeStore) -> Self {
        Self { identity: None, progress, practice }
    }

    /// A signed-out learner with both stores on one backend
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self::new(ProgressStore::new(backend.clone()), PracticeStore::new(backend))
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Switch to `identity`
    pub fn sign_in(&mut self, identity: Identity) {
        tracing::debug!("Signed in as {}", identity);
        self.identity = Some(identity);
    }

    /// Drop the current identity; its records are kept
    pub fn sign_out(&mut self) {
        if let Some(identity) = self.identity.take() {
            tracing::debug!("Signed out {}", identity);
        }
    }

    /// Delete every record of the current identity and sign out
    ///
    /// Returns false when nobody is signed in.
    pub fn delete_account(&mut self) -> StorageResult<bool> {
        let Some(identity) = self.identity.as_ref() else {
            return Ok(false);
        };

        self.progress.forget(identity)?;
        self.practice.forget(identity)?;
        tracing::info!("Deleted stored progress for {}", identity);

        self.identity = None;
        Ok(true)
    }

    /// Lesson completion state of the current identity
    pub fn lessons(&self) -> LessonCompletionState {
        self.progress.load(self.identity())
    }

    pub fn mark_complete(&self, course_id: &str, lesson_id: &str) -> StorageResult<()> {
        self.progress.mark_complete(self.identity(), course_id, lesson_id)
    }

    pub fn mark_incomplete(&self, course_id: &str, lesson_id: &str) -> StorageResult<()> {
        self.progress.mark_incomplete(self.identity(), course_id, lesson_id)
    }

    pub fn is_complete(&self, course_id: &str, lesson_id: &str) -> bool {
        self.progress.is_complete(self.identity(), course_id, lesson_id)
    }

    /// Progress in one course, counted against the catalog
    pub fn course_progress(&self, course: &Course) -> CourseProgressSummary {
        catalog_course_progress(&self.lessons(), course)
    }

    /// Progress across the catalog
    pub fn overall_progress(&self, catalog: &Catalog) -> OverallProgressSummary {
        catalog_overall_progress(&self.lessons(), catalog)
    }

    pub fn submit_answer(&self, topic_id: &str, question_id: &str, is_correct: bool) -> StorageResult<()> {
        self.practice.submit_answer(self.identity(), topic_id, question_id, is_correct)
    }

    pub fn topic_progress(&self, topic_id: &str) -> TopicProgress {
        self.practice.topic_progress(self.identity(), topic_id)
    }

    pub fn practice_stats(&self) -> OverallPracticeStats {
        overall_stats(&self.practice.load(self.identity()))
    }

    /// Build the dashboard from one snapshot of each record
    pub fn dashboard(&self, catalog: &Catalog) -> Dashboard {
        let lessons = self.lessons();
        let courses = catalog
            .courses()
            .iter()
            .map(|course| CourseEntry {
                course_id: course.id,
                title: course.title.clone(),
                progress: catalog_course_progress(&lessons, course),
            })
            .collect();

        Dashboard {
            overall: catalog_overall_progress(&lessons, catalog),
            courses,
            practice: overall_stats(&self.practice.load(self.identity())),
        }
    }
}
