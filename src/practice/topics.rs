//! Built-in practice topics and answer checking

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Topics embedded in the binary
static BUILTIN: Lazy<Vec<PracticeTopic>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/practice_topics.json"))
        .expect("embedded practice topics are valid JSON")
});

/// Topic difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    pub explanation: String,
}

impl Question {
    /// Whether option `choice` (0-based) is the correct one
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer
    }

    /// Text of the correct option
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// A named set of questions sharing one progress record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeTopic {
    pub id: String,
    pub title: String,
    pub category: String,
    pub icon: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
}

impl PracticeTopic {
    /// Find a question by id
    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// The practice topics shipped with the application
pub fn builtin_topics() -> &'static [PracticeTopic] {
    &BUILTIN
}

/// Find a built-in topic by id
pub fn find_topic(topic_id: &str) -> Option<&'static PracticeTopic> {
    builtin_topics().iter().find(|t| t.id == topic_id)
}
