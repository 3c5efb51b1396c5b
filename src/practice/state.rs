//! Practice counters per topic

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::progress::summary::percentage;

/// Attempt and solve counters for one practice topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicProgress {
    /// Distinct questions answered correctly at least once
    pub solved_count: u32,
    /// Every submitted answer
    pub total_attempts: u32,
    /// Submitted answers that were correct
    pub correct_attempts: u32,
    /// Ids of solved questions, in the order they were first solved
    pub completed_questions: Vec<String>,
}

impl TopicProgress {
    /// Record one answer; returns true when it solved the question for the first time
    pub fn record(&mut self, question_id: &str, is_correct: bool) -> bool {
        let is_new_solve = is_correct && !self.is_solved(question_id);

        self.total_attempts = self.total_attempts.saturating_add(1);
        if is_correct {
            self.correct_attempts = self.correct_attempts.saturating_add(1);
        }
        if is_new_solve {
            self.solved_count = self.solved_count.saturating_add(1);
            self.completed_questions.push(question_id.to_string());
        }

        is_new_solve
    }

    /// Whether a question has been answered correctly before
    pub fn is_solved(&self, question_id: &str) -> bool {
        self.completed_questions.iter().any(|q| q == question_id)
    }

    /// Share of correct attempts, 0 with no attempts
    pub fn accuracy(&self) -> u32 {
        percentage(self.correct_attempts as usize, self.total_attempts as usize)
    }

    /// Share of a topic's `question_count` questions solved
    pub fn completion(&self, question_count: usize) -> u32 {
        percentage(self.solved_count as usize, question_count).min(100)
    }

    /// Restore the counter invariants on a record read from storage
    ///
    /// Returns true when anything had to change.
    fn repair(&mut self) -> bool {
        let mut changed = false;

        let mut seen = HashSet::new();
        let before = self.completed_questions.len();
        self.completed_questions.retain(|q| seen.insert(q.clone()));
        changed |= self.completed_questions.len() != before;

        let solved = self.completed_questions.len() as u32;
        if self.solved_count != solved {
            self.solved_count = solved;
            changed = true;
        }
        if self.correct_attempts > self.total_attempts {
            self.correct_attempts = self.total_attempts;
            changed = true;
        }

        changed
    }
}

/// Practice progress for every topic of one identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeState {
    topics: HashMap<String, TopicProgress>,
}

impl PracticeState {
    /// Progress for a topic, zeroed when never attempted
    pub fn topic(&self, topic_id: &str) -> TopicProgress {
        self.topics.get(topic_id).cloned().unwrap_or_default()
    }

    /// Get or create the record for a topic
    pub fn topic_mut(&mut self, topic_id: &str) -> &mut TopicProgress {
        self.topics.entry(topic_id.to_string()).or_default()
    }

    /// Iterate over every attempted topic
    pub fn topics(&self) -> impl Iterator<Item = (&str, &TopicProgress)> {
        self.topics.iter().map(|(id, progress)| (id.as_str(), progress))
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Repair every topic record, returning the ids that were changed
    pub fn repair(&mut self) -> Vec<String> {
        let mut repaired: Vec<String> = self
            .topics
            .iter_mut()
            .filter_map(|(id, topic)| topic.repair().then(|| id.clone()))
            .collect();
        repaired.sort();
        repaired
    }
}
