//! Progress reporting for consensus runs
//!
//! Iteration numbers are shown 1-based.

use colored::Colorize;
use consensus_application::ConsensusProgressNotifier;
use consensus_domain::{
    AgentId, AgentResponse, ConsensusOutcome, DEFAULT_PREVIEW_CHARS, MERGE_ITERATION, PromptKind,
    RoundResult, truncate,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

fn round_title(iteration: usize, kind: PromptKind) -> String {
    let what = match kind {
        PromptKind::Initial => "independent answers",
        PromptKind::Merge => "merge",
        PromptKind::Feedback => "review",
    };
    format!("Iteration {}: ({})", iteration + 1, what)
}

fn agreement_line(agent: &AgentId, response: &AgentResponse) -> String {
    let status = if response.agrees {
        "Agrees".green()
    } else {
        "Disagrees".yellow()
    };
    format!("{}'s agreement status: {}", agent, status)
}

fn preview_line(agent: &AgentId, response: &AgentResponse, preview_chars: usize) -> String {
    let text = if response.text.is_empty() {
        "(no answer)".dimmed().to_string()
    } else {
        truncate(&response.text, preview_chars)
    };
    format!("{}'s response: {}", agent, text)
}

fn round_summary(round: &RoundResult, consensus: bool) -> String {
    let verdict = if consensus {
        "All agents agree".green().bold()
    } else {
        "No consensus yet".yellow()
    };
    format!(
        "{} {}/{} agree {}",
        round.vote_summary(),
        round.agree_count(),
        round.len(),
        verdict
    )
}

fn finish_line(outcome: &ConsensusOutcome) -> String {
    if outcome.is_converged() {
        format!(
            "{} after {} iterations",
            "Consensus reached!".green().bold(),
            outcome.iterations
        )
    } else {
        // Without a merge round the fallback is the first agent's own answer
        let fallback = if outcome.iterations > MERGE_ITERATION {
            "merged answer"
        } else {
            "initial answer"
        };
        format!(
            "{} Returning the first agent's {}.",
            "Maximum iterations reached without consensus.".yellow().bold(),
            fallback
        )
    }
}

/// Reports progress with one progress bar per round
pub struct ProgressReporter {
    preview_chars: usize,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
            round_bar: Mutex::new(None),
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.round_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusProgressNotifier for ProgressReporter {
    fn on_round_start(&self, iteration: usize, kind: PromptKind, total_agents: usize) {
        let pb = ProgressBar::new(total_agents as u64);
        pb.set_style(Self::round_style());
        pb.set_prefix(round_title(iteration, kind));
        pb.set_message("Starting...");

        if let Ok(mut guard) = self.round_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_agent_start(&self, _iteration: usize, agent: &AgentId) {
        self.with_bar(|pb| pb.set_message(format!("Asking {}...", agent)));
    }

    fn on_agent_response(&self, _iteration: usize, agent: &AgentId, response: &AgentResponse) {
        let agreement = agreement_line(agent, response);
        let preview = preview_line(agent, response, self.preview_chars);
        self.with_bar(|pb| {
            pb.println(format!("  {}", agreement));
            pb.println(format!("  {}", preview));
            pb.inc(1);
        });
    }

    fn on_round_complete(&self, _iteration: usize, round: &RoundResult, consensus: bool) {
        if let Ok(mut guard) = self.round_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(round_summary(round, consensus));
        }
    }

    fn on_finished(&self, outcome: &ConsensusOutcome) {
        eprintln!("{}", finish_line(outcome));
    }
}

/// Plain line-by-line transcript (no fancy UI)
///
/// Written to stderr so stdout carries only the final output.
pub struct SimpleProgress {
    preview_chars: usize,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusProgressNotifier for SimpleProgress {
    fn on_round_start(&self, iteration: usize, kind: PromptKind, total_agents: usize) {
        eprintln!();
        eprintln!(
            "{} {} ({} agents)",
            "->".cyan(),
            round_title(iteration, kind).as_str().bold(),
            total_agents
        );
    }

    fn on_agent_start(&self, _iteration: usize, agent: &AgentId) {
        eprintln!("  Asking {}...", agent);
    }

    fn on_agent_response(&self, _iteration: usize, agent: &AgentId, response: &AgentResponse) {
        eprintln!("  {}", agreement_line(agent, response));
        eprintln!("  {}", preview_line(agent, response, self.preview_chars));
    }

    fn on_round_complete(&self, _iteration: usize, round: &RoundResult, consensus: bool) {
        eprintln!("  {}", round_summary(round, consensus));
    }

    fn on_finished(&self, outcome: &ConsensusOutcome) {
        eprintln!();
        eprintln!("{}", finish_line(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_domain::{ConvergenceStatus, Question};

    fn id(name: &str) -> AgentId {
        AgentId::new(name).unwrap()
    }

    #[test]
    fn test_round_title_is_one_based() {
        assert!(round_title(0, PromptKind::Initial).starts_with("Iteration 1:"));
        assert!(round_title(2, PromptKind::Feedback).starts_with("Iteration 3:"));
    }

    #[test]
    fn test_agreement_line() {
        let line = agreement_line(&id("Gemini"), &AgentResponse::agree("x"));
        assert!(line.starts_with("Gemini's agreement status: "));
        assert!(line.contains("Agrees"));
        assert!(agreement_line(&id("Gemini"), &AgentResponse::disagree("x")).contains("Disagrees"));
    }

    #[test]
    fn test_preview_is_truncated() {
        let long = "a".repeat(500);
        let line = preview_line(&id("Claude"), &AgentResponse::disagree(long), 200);
        assert_eq!(line, format!("Claude's response: {}...", "a".repeat(200)));
    }

    #[test]
    fn test_round_summary_counts() {
        let round: RoundResult = [
            (id("a"), AgentResponse::agree("x")),
            (id("b"), AgentResponse::disagree("y")),
        ]
        .into_iter()
        .collect();
        let line = round_summary(&round, false);
        assert!(line.contains("1/2 agree"));
        assert!(line.contains("No consensus yet"));
    }

    fn exhausted_after(iterations: usize) -> ConsensusOutcome {
        let round: RoundResult = [(id("a"), AgentResponse::disagree("x"))]
            .into_iter()
            .collect();
        ConsensusOutcome::new(
            Question::new("q"),
            "x",
            ConvergenceStatus::Exhausted,
            iterations,
            iterations,
            round,
        )
    }

    #[test]
    fn test_finish_line_names_fallback() {
        assert!(finish_line(&exhausted_after(1)).ends_with("Returning the first agent's initial answer."));
        assert!(finish_line(&exhausted_after(3)).ends_with("Returning the first agent's merged answer."));
    }

    #[test]
    fn test_default_preview_width() {
        assert_eq!(ProgressReporter::new().preview_chars, DEFAULT_PREVIEW_CHARS);
        assert_eq!(SimpleProgress::new().preview_chars, 200);
    }
}
