//! Persistent lesson completion per identity

use std::sync::Arc;

use super::state::LessonCompletionState;
use crate::identity::Identity;
use crate::storage::{self, Backend, Record, StorageResult};

/// Reads and writes [`LessonCompletionState`] records
///
/// Every mutation loads the identity's whole record, changes one flag and
/// writes the whole record back. Without an identity nothing is read or
/// written.
#[derive(Clone)]
pub struct ProgressStore {
    backend: Arc<dyn Backend>,
}

impl ProgressStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Current state for `identity`; empty when signed out, missing or unreadable
    pub fn load(&self, identity: Option<&Identity>) -> LessonCompletionState {
        match identity {
            Some(identity) => {
                storage::load_or_default(self.backend.as_ref(), &Record::Progress.key(identity))
            }
            None => LessonCompletionState::default(),
        }
    }

    /// Mark a lesson complete
    pub fn mark_complete(
        &self,
        identity: Option<&Identity>,
        course_id: &str,
        lesson_id: &str,
    ) -> StorageResult<()> {
        self.set_flag(identity, course_id, lesson_id, true)
    }

    /// Mark a lesson incomplete (the flag is kept as `false`)
    pub fn mark_incomplete(
        &self,
        identity: Option<&Identity>,
        course_id: &str,
        lesson_id: &str,
    ) -> StorageResult<()> {
        self.set_flag(identity, course_id, lesson_id, false)
    }

    /// Whether a lesson is complete for `identity`
    pub fn is_complete(&self, identity: Option<&Identity>, course_id: &str, lesson_id: &str) -> bool {
        self.load(identity).is_complete(course_id, lesson_id)
    }

    /// Delete the identity's record
    pub fn forget(&self, identity: &Identity) -> StorageResult<()> {
        self.backend.remove(&Record::Progress.key(identity))
    }

    fn set_flag(
        &self,
        identity: Option<&Identity>,
        course_id: &str,
        lesson_id: &str,
        complete: bool,
    ) -> StorageResult<()> {
        let Some(identity) = identity else {
            tracing::debug!("Ignoring lesson update for {}/{} while signed out", course_id, lesson_id);
            return Ok(());
        };

        let key = Record::Progress.key(identity);
        let mut state: LessonCompletionState =
            storage::load_or_default(self.backend.as_ref(), &key);
        state.set(course_id, lesson_id, complete);
        storage::save(self.backend.as_ref(), &key, &state)
    }
}
