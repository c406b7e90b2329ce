//! Convergence state machine.
//!
//! ```text
//!            record_round(i)
//! Running(0) ───────────────► Running(1) ─► ... ─► Running(max - 1)
//!     │                           │                      │
//!     │ all agree                 │ all agree            │ all agree / bound hit
//!     ▼                           ▼                      ▼
//! Converged(answer)        Converged(answer)   Converged | Exhausted(answer)
//! ```
//!
//! The answer of both terminal states is the candidate captured at
//! iteration 1 when one exists, otherwise the first-registered agent's text
//! from the final round.

use super::round::RoundResult;
use super::rule::has_consensus;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Iteration index of the merge round, where the candidate answer is captured.
pub const MERGE_ITERATION: usize = 1;

/// Phase of a convergence run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergencePhase {
    /// Waiting for the round with this 0-based iteration index
    Running(usize),
    /// Every agent agreed
    Converged(String),
    /// The iteration bound was reached without agreement
    Exhausted(String),
}

impl ConvergencePhase {
    /// The final answer, if the phase is terminal
    pub fn answer(&self) -> Option<&str> {
        match self {
            ConvergencePhase::Running(_) => None,
            ConvergencePhase::Converged(a) | ConvergencePhase::Exhausted(a) => Some(a),
        }
    }
}

/// Mutable state of one convergence run.
#[derive(Debug, Clone)]
pub struct ConvergenceState {
    max_iterations: usize,
    phase: ConvergencePhase,
    rounds_executed: usize,
    candidate_answer: Option<String>,
    last_round: Option<RoundResult>,
}

impl ConvergenceState {
    pub fn new(max_iterations: usize) -> Result<Self, DomainError> {
        if max_iterations == 0 {
            return Err(DomainError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self {
            max_iterations,
            phase: ConvergencePhase::Running(0),
            rounds_executed: 0,
            candidate_answer: None,
            last_round: None,
        })
    }

    pub fn phase(&self) -> &ConvergencePhase {
        &self.phase
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn rounds_executed(&self) -> usize {
        self.rounds_executed
    }

    pub fn candidate_answer(&self) -> Option<&str> {
        self.candidate_answer.as_deref()
    }

    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    /// Consume the state, yielding the last round
    pub fn into_last_round(self) -> Option<RoundResult> {
        self.last_round
    }

    /// Feed the result of the current iteration and advance.
    ///
    /// The round replaces the previously held one. At the merge iteration the
    /// first-registered agent's text becomes the candidate answer before the
    /// consensus check runs. Rounds fed after a terminal phase are ignored.
    pub fn record_round(&mut self, round: RoundResult) -> &ConvergencePhase {
        let ConvergencePhase::Running(iteration) = self.phase else {
            return &self.phase;
        };

        self.rounds_executed += 1;

        if iteration == MERGE_ITERATION && self.candidate_answer.is_none() {
            self.candidate_answer = round.first_text().map(str::to_string);
        }

        let agreed = has_consensus(&round);
        let answer = self.fallback_answer(&round);
        self.last_round = Some(round);

        self.phase = if agreed {
            ConvergencePhase::Converged(answer)
        } else if iteration + 1 >= self.max_iterations {
            ConvergencePhase::Exhausted(answer)
        } else {
            ConvergencePhase::Running(iteration + 1)
        };

        &self.phase
    }

    fn fallback_answer(&self, round: &RoundResult) -> String {
        self.candidate_answer
            .clone()
            .or_else(|| round.first_text().map(str::to_string))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentId, AgentResponse};

    fn round(responses: &[(&str, bool, &str)]) -> RoundResult {
        responses
            .iter()
            .map(|(name, agrees, text)| {
                (AgentId::new(*name).unwrap(), AgentResponse::new(*agrees, *text))
            })
            .collect()
    }

    #[test]
    fn test_rejects_zero_iterations() {
        assert_eq!(
            ConvergenceState::new(0).unwrap_err(),
            DomainError::InvalidMaxIterations(0)
        );
    }

    #[test]
    fn test_consensus_at_iteration_zero() {
        let mut state = ConvergenceState::new(5).unwrap();
        let phase = state.record_round(round(&[("a", true, "A0"), ("b", true, "B0")]));

        assert_eq!(phase, &ConvergencePhase::Converged("A0".to_string()));
        assert_eq!(state.rounds_executed(), 1);
        assert!(state.candidate_answer().is_none());
    }

    #[test]
    fn test_candidate_captured_at_merge_round() {
        let mut state = ConvergenceState::new(5).unwrap();
        state.record_round(round(&[("a", false, "A0"), ("b", false, "B0")]));
        assert_eq!(state.phase(), &ConvergencePhase::Running(1));

        let phase = state.record_round(round(&[("a", true, "merged"), ("b", true, "other")]));
        assert_eq!(phase, &ConvergencePhase::Converged("merged".to_string()));
        assert_eq!(state.candidate_answer(), Some("merged"));
    }

    #[test]
    fn test_candidate_never_overwritten() {
        let mut state = ConvergenceState::new(5).unwrap();
        state.record_round(round(&[("a", false, "A0")]));
        state.record_round(round(&[("a", false, "merged")]));
        state.record_round(round(&[("a", false, "A2")]));
        let phase = state.record_round(round(&[("a", true, "A3")]));

        assert_eq!(phase, &ConvergencePhase::Converged("merged".to_string()));
        assert_eq!(state.rounds_executed(), 4);
    }

    #[test]
    fn test_exhausted_returns_candidate() {
        let mut state = ConvergenceState::new(3).unwrap();
        state.record_round(round(&[("a", false, "A0"), ("b", true, "B0")]));
        state.record_round(round(&[("a", true, "merged"), ("b", false, "B1")]));
        let phase = state.record_round(round(&[("a", true, "A2"), ("b", false, "B2")]));

        assert_eq!(phase, &ConvergencePhase::Exhausted("merged".to_string()));
        assert_eq!(state.rounds_executed(), 3);
        assert_eq!(state.last_round().unwrap().first_text(), Some("A2"));
    }

    #[test]
    fn test_single_iteration_falls_back_to_first_agent() {
        let mut state = ConvergenceState::new(1).unwrap();
        let phase = state.record_round(round(&[("a", false, "A0"), ("b", false, "B0")]));

        assert_eq!(phase, &ConvergencePhase::Exhausted("A0".to_string()));
        assert!(state.candidate_answer().is_none());
    }

    #[test]
    fn test_rounds_after_terminal_are_ignored() {
        let mut state = ConvergenceState::new(1).unwrap();
        state.record_round(round(&[("a", true, "A0")]));
        let phase = state.record_round(round(&[("a", true, "late")]));

        assert_eq!(phase.answer(), Some("A0"));
        assert_eq!(state.rounds_executed(), 1);
    }

    #[test]
    fn test_candidate_present_iff_two_rounds_ran() {
        let mut state = ConvergenceState::new(5).unwrap();
        state.record_round(round(&[("a", false, "A0")]));
        assert!(state.candidate_answer().is_none());
        state.record_round(round(&[("a", false, "A1")]));
        assert!(state.candidate_answer().is_some());
    }
}
