//! Persistent practice progress per identity

use std::sync::Arc;

use super::state::{PracticeState, TopicProgress};
use crate::identity::Identity;
use crate::storage::{self, Backend, Record, StorageResult};

/// Reads and writes [`PracticeState`] records
///
/// Submissions are read-merge-write on the identity's whole record. There is
/// no way to un-solve a question.
#[derive(Clone)]
pub struct PracticeStore {
    backend: Arc<dyn Backend>,
}

impl PracticeStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Current state for `identity`; empty when signed out, missing or unreadable
    pub fn load(&self, identity: Option<&Identity>) -> PracticeState {
        let Some(identity) = identity else {
            return PracticeState::default();
        };

        let key = Record::Practice.key(identity);
        let mut state: PracticeState = storage::load_or_default(self.backend.as_ref(), &key);
        let repaired = state.repair();
        if !repaired.is_empty() {
            tracing::warn!("Repaired inconsistent practice topics in {}: {:?}", key, repaired);
        }
        state
    }

    /// Record an answer to `question_id` in `topic_id`
    pub fn submit_answer(
        &self,
        identity: Option<&Identity>,
        topic_id: &str,
        question_id: &str,
        is_correct: bool,
    ) -> StorageResult<()> {
        let Some(identity) = identity else {
            tracing::debug!("Ignoring answer to {}/{} while signed out", topic_id, question_id);
            return Ok(());
        };

        let mut state = self.load(Some(identity));
        if state.topic_mut(topic_id).record(question_id, is_correct) {
            tracing::debug!("{} solved {}/{}", identity, topic_id, question_id);
        }
        storage::save(self.backend.as_ref(), &Record::Practice.key(identity), &state)
    }

    /// Progress for one topic, zeroed when never attempted
    pub fn topic_progress(&self, identity: Option<&Identity>, topic_id: &str) -> TopicProgress {
        self.load(identity).topic(topic_id)
    }

    /// Delete the identity's record
    pub fn forget(&self, identity: &Identity) -> StorageResult<()> {
        self.backend.remove(&Record::Practice.key(identity))
    }
}
