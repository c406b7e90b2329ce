//! Question value object

use serde::{Deserialize, Serialize};

/// The question a consensus run is about (Value Object)
///
/// Supplied once per run and never modified. An empty question is legal:
/// the merge and feedback prompts simply render an empty
/// "Original question" section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the question has no visible content
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

impl From<String> for Question {
    fn from(s: String) -> Self {
        Question::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("What is Rust?");
        assert_eq!(q.content(), "What is Rust?");
    }

    #[test]
    fn test_question_from_str() {
        let q: Question = "What is Rust?".into();
        assert_eq!(q.content(), "What is Rust?");
        assert_eq!(q.to_string(), "What is Rust?");
    }

    #[test]
    fn test_empty_question_is_allowed() {
        let q = Question::new("");
        assert_eq!(q.content(), "");
        assert!(q.is_blank());
        assert!(Question::new("   ").is_blank());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let q = Question::new("Why?");
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"Why?\"");
    }
}
