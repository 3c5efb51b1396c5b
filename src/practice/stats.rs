//! Practice statistics across topics

use serde::Serialize;

use super::state::PracticeState;
use crate::progress::summary::percentage;

/// Totals over every practice topic of one identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverallPracticeStats {
    pub total_solved: u32,
    pub total_attempts: u32,
    pub total_correct: u32,
    /// Rounded percentage of correct attempts, 0 with no attempts
    pub accuracy: u32,
}

/// Sum counters over all topics
pub fn overall_stats(state: &PracticeState) -> OverallPracticeStats {
    let mut stats = OverallPracticeStats::default();
    for (_, topic) in state.topics() {
        stats.total_solved = stats.total_solved.saturating_add(topic.solved_count);
        stats.total_attempts = stats.total_attempts.saturating_add(topic.total_attempts);
        stats.total_correct = stats.total_correct.saturating_add(topic.correct_attempts);
    }
    stats.accuracy = percentage(stats.total_correct as usize, stats.total_attempts as usize);
    stats
}
