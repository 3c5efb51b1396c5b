//! Quiz practice
//!
//! Per-topic attempt counters, first-solve tracking and overall accuracy.

pub mod state;
pub mod stats;
pub mod store;
pub mod topics;

pub use state::{PracticeState, TopicProgress};
pub use stats::{OverallPracticeStats, overall_stats};
pub use store::PracticeStore;
pub use topics::{Difficulty, PracticeTopic, Question, builtin_topics, find_topic};
