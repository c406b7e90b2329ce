//! Console output formatter for consensus outcomes

use colored::Colorize;
use consensus_domain::{ConsensusOutcome, OutputFormat};
use serde_json::json;

/// Formats consensus outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format `outcome` in the requested format
    pub fn format(outcome: &ConsensusOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::format_answer(outcome),
            OutputFormat::Full => Self::format_full(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Only the final answer
    pub fn format_answer(outcome: &ConsensusOutcome) -> String {
        outcome.answer.clone()
    }

    /// Status, iteration count, the last round per agent and the answer
    pub fn format_full(outcome: &ConsensusOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Consensus Result"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            outcome.question
        ));

        let status = if outcome.is_converged() {
            "Consensus reached".green().bold()
        } else {
            "No consensus (iteration limit reached)".yellow().bold()
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));
        output.push_str(&format!(
            "{} {}/{}\n\n",
            "Iterations:".cyan().bold(),
            outcome.iterations,
            outcome.max_iterations
        ));

        output.push_str(&Self::section_header(&format!(
            "Final Round {}",
            outcome.final_round.vote_summary()
        )));
        for (agent, response) in outcome.final_round.iter() {
            let title = format!("── {} ──", agent);
            let title = if response.agrees {
                title.green().bold()
            } else {
                title.yellow().bold()
            };
            let vote = if response.agrees { "agrees" } else { "disagrees" };
            let body = if response.text.is_empty() {
                "(no answer)".dimmed().to_string()
            } else {
                Self::indent(&response.text, "  ")
            };
            output.push_str(&format!("\n{} {}\n{}\n", title, vote.dimmed(), body));
        }

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", outcome.answer));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ConsensusOutcome) -> String {
        let final_round: Vec<_> = outcome
            .final_round
            .iter()
            .map(|(agent, response)| {
                json!({
                    "agent": agent,
                    "agrees": response.agrees,
                    "text": response.text,
                })
            })
            .collect();

        let value = json!({
            "question": outcome.question,
            "answer": outcome.answer,
            "status": outcome.status,
            "iterations": outcome.iterations,
            "max_iterations": outcome.max_iterations,
            "final_round": final_round,
        });

        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
