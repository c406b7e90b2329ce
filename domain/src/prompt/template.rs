//! Prompt templates for the convergence rounds

use crate::consensus::RoundResult;
use crate::consensus::state::MERGE_ITERATION;
use crate::core::question::Question;

const MERGE_INSTRUCTIONS: &str = "Please merge these responses into a single, comprehensive answer that combines the best aspects of each response. \n\
Your response should be in the following format:\n\
\n\
True\n\
[Merged response that combines the best aspects of all previous responses]\n\
\n\
The first line must be 'True' to indicate you're providing a merged response.";

const FEEDBACK_INSTRUCTIONS: &str = "Please review these responses and provide your feedback in the following format:\n\
\n\
True\n\
[Your merged response that combines the best aspects of all responses]\n\
\n\
OR\n\
\n\
False\n\
[Your detailed response explaining why you disagree and what should be changed]\n\
\n\
The first line must be exactly 'True' or 'False' to indicate whether you agree with the merged approach.";

/// Which of the three prompts a round uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// The raw question
    Initial,
    /// Ask every agent to merge the independent answers
    Merge,
    /// Ask every agent to vote on the merged answers
    Feedback,
}

impl PromptKind {
    pub fn for_iteration(iteration: usize) -> Self {
        match iteration {
            0 => PromptKind::Initial,
            MERGE_ITERATION => PromptKind::Merge,
            _ => PromptKind::Feedback,
        }
    }
}

/// Templates for generating the prompt of each round.
///
/// All functions are pure: identical inputs give byte-identical prompts.
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for the given 0-based iteration.
    ///
    /// `previous` is the round before this one; it is ignored for iteration 0
    /// and treated as empty if absent afterwards.
    pub fn for_iteration(
        iteration: usize,
        question: &Question,
        previous: Option<&RoundResult>,
    ) -> String {
        let empty = RoundResult::new();
        let previous = previous.unwrap_or(&empty);

        match PromptKind::for_iteration(iteration) {
            PromptKind::Initial => Self::initial(question),
            PromptKind::Merge => Self::merge(question, previous),
            PromptKind::Feedback => Self::feedback(question, previous),
        }
    }

    /// Iteration 0: the question, unmodified
    pub fn initial(question: &Question) -> String {
        question.content().to_string()
    }

    /// Iteration 1: merge every agent's independent answer
    pub fn merge(question: &Question, previous: &RoundResult) -> String {
        let mut prompt = Self::responses_section(question, previous);
        prompt.push_str(MERGE_INSTRUCTIONS);
        prompt
    }

    /// Iteration 2+: vote on the merged answers
    pub fn feedback(question: &Question, previous: &RoundResult) -> String {
        let mut prompt = Self::responses_section(question, previous);
        prompt.push_str(FEEDBACK_INSTRUCTIONS);
        prompt
    }

    fn responses_section(question: &Question, previous: &RoundResult) -> String {
        let mut prompt = format!("Original question: {}\n\n", question.content());
        prompt.push_str("Here are the responses from other AI models:\n\n");

        for (agent, response) in previous.iter() {
            prompt.push_str(&format!("{}:\n{}\n\n", agent, response.text));
        }

        prompt
    }
}
