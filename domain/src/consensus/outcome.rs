//! Result of a completed consensus run.

use super::round::RoundResult;
use super::state::ConvergencePhase;
use crate::core::question::Question;
use serde::{Deserialize, Serialize};

/// How a run terminated.
///
/// Not part of the answer itself: both statuses carry a usable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceStatus {
    /// Every agent agreed in the final round
    Converged,
    /// The iteration bound was reached without agreement
    Exhausted,
}

impl ConvergenceStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceStatus::Converged)
    }

    /// Status and answer of a terminal phase, `None` while still running
    pub fn from_phase(phase: &ConvergencePhase) -> Option<(Self, &str)> {
        let status = match phase {
            ConvergencePhase::Running(_) => return None,
            ConvergencePhase::Converged(_) => ConvergenceStatus::Converged,
            ConvergencePhase::Exhausted(_) => ConvergenceStatus::Exhausted,
        };
        phase.answer().map(|answer| (status, answer))
    }
}

impl std::fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvergenceStatus::Converged => write!(f, "Converged"),
            ConvergenceStatus::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Complete result of a consensus run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    /// The question that was asked
    pub question: Question,
    /// The agreed (or best available) answer
    pub answer: String,
    /// Whether agreement was reached
    pub status: ConvergenceStatus,
    /// Number of rounds that ran
    pub iterations: usize,
    /// The configured iteration bound
    pub max_iterations: usize,
    /// Responses of the last round that ran
    pub final_round: RoundResult,
}

impl ConsensusOutcome {
    pub fn new(
        question: Question,
        answer: impl Into<String>,
        status: ConvergenceStatus,
        iterations: usize,
        max_iterations: usize,
        final_round: RoundResult,
    ) -> Self {
        Self {
            question,
            answer: answer.into(),
            status,
            iterations,
            max_iterations,
            final_round,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }
}
