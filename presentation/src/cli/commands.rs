//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for consensus results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Status, iterations, final votes and the answer
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for consensus_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => Self::Answer,
            OutputFormat::Full => Self::Full,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for llm-consensus
#[derive(Parser, Debug)]
#[command(name = "llm-consensus")]
#[command(author, version, about = "Ask several LLMs the same question until they agree on one answer")]
#[command(long_about = r#"
llm-consensus asks every configured model the same question and loops until
all of them agree on a single answer, or the iteration limit is reached.

Each round:
1. Iteration 1: every model answers the question on its own
2. Iteration 2: every model merges all answers into one
3. Later iterations: every model reviews the other answers and either
   agrees or proposes an improvement

The first agent's merged answer is the fallback when no consensus is reached
(its initial answer when only one iteration ran).

Configuration files are loaded from (in priority order):
1. LLM_CONSENSUS_* environment variables
2. --config <path>        Explicit config file
3. ./consensus.toml       Project-level config
4. ~/.config/llm-consensus/config.toml   Global config

API keys are read from OPENAI_API_KEY, GEMINI_API_KEY and ANTHROPIC_API_KEY
(a .env file in the working directory is loaded first).

Example:
  llm-consensus "What is the capital of Australia?"
  llm-consensus -a ChatGPT -a Claude --max-iterations 3 "Explain ownership in Rust"
  llm-consensus --chat --parallel
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Agents to include (by configured name, can be specified multiple times)
    #[arg(short, long, value_name = "NAME")]
    pub agent: Vec<String>,

    /// Maximum number of iterations before giving up on consensus
    #[arg(short = 'n', long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Ask the agents of each round concurrently
    #[arg(short, long)]
    pub parallel: bool,

    /// Per-agent timeout in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output format (defaults to the configured format, else answer)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_question() {
        let cli = Cli::try_parse_from(["llm-consensus", "What is Rust?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is Rust?"));
        assert!(!cli.chat);
        assert!(cli.agent.is_empty());
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "llm-consensus",
            "-a",
            "ChatGPT",
            "--agent",
            "Claude",
            "-n",
            "3",
            "--parallel",
            "--timeout",
            "30",
            "-o",
            "json",
            "-vv",
            "q",
        ])
        .unwrap();
        assert_eq!(cli.agent, vec!["ChatGPT", "Claude"]);
        assert_eq!(cli.max_iterations, Some(3));
        assert!(cli.parallel);
        assert_eq!(cli.timeout, Some(30));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_output_format_into_domain() {
        let format: consensus_domain::OutputFormat = OutputFormat::Full.into();
        assert_eq!(format, consensus_domain::OutputFormat::Full);
    }
}
