//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use consensus_application::{NoProgress, RunConsensusUseCase};
use consensus_domain::{DEFAULT_PREVIEW_CHARS, OutputFormat, Question};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// What a line typed at the prompt means
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Empty,
    Quit,
    Command(&'a str),
    Question(&'a str),
}

impl<'a> ReplInput<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            ReplInput::Empty
        } else if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            ReplInput::Quit
        } else if line.starts_with('/') {
            ReplInput::Command(line)
        } else {
            ReplInput::Question(line)
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RunConsensusUseCase,
    format: OutputFormat,
    show_progress: bool,
    preview_chars: usize,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: RunConsensusUseCase) -> Self {
        Self {
            use_case,
            format: OutputFormat::Answer,
            show_progress: true,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("llm-consensus").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("Question> ");

            match readline {
                Ok(line) => match ReplInput::parse(&line) {
                    ReplInput::Empty => continue,
                    ReplInput::Quit => {
                        println!("Bye!");
                        break;
                    }
                    ReplInput::Command(cmd) => {
                        if self.handle_command(cmd) {
                            break;
                        }
                    }
                    ReplInput::Question(question) => {
                        let _ = rl.add_history_entry(question);
                        self.process_question(question).await;
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn agent_names(&self) -> Vec<&str> {
        self.use_case.registry().ids().map(|id| id.as_str()).collect()
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         LLM Consensus - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Agents: {}", self.agent_names().join(", "));
        println!(
            "Max iterations: {}",
            self.use_case.params().max_iterations
        );
        println!();
        println!("Type your question, or 'quit' to exit.");
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /agents   - Show participating agents");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /agents          - Show participating agents");
                println!("  /quit, /exit, /q - Exit chat (or type 'quit')");
                println!();
                false
            }
            "/agents" => {
                println!();
                println!("Participating agents (in order):");
                for name in self.agent_names() {
                    println!("  - {}", name);
                }
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_question(&self, question: &str) {
        println!();

        let question = Question::new(question);
        let outcome = if self.show_progress {
            let progress = ProgressReporter::new().with_preview_chars(self.preview_chars);
            self.use_case.execute_with_progress(question, &progress).await
        } else {
            self.use_case.execute_with_progress(question, &NoProgress).await
        };

        println!();
        println!("Final answer:");
        println!("{}", ConsoleFormatter::format(&outcome, self.format));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use consensus_application::{AgentGateway, AgentRegistry, ConsensusParams};
    use consensus_domain::{AgentId, AgentResponse};
    use std::sync::Arc;

    struct Agreeable;

    #[async_trait]
    impl AgentGateway for Agreeable {
        async fn respond(&self, _prompt: &str) -> AgentResponse {
            AgentResponse::agree("42")
        }
    }

    fn repl() -> ChatRepl {
        let registry = AgentRegistry::new()
            .with_agent(AgentId::new("ChatGPT").unwrap(), Arc::new(Agreeable))
            .unwrap();
        let use_case = RunConsensusUseCase::new(registry, ConsensusParams::default()).unwrap();
        ChatRepl::new(use_case).with_progress(false)
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(ReplInput::parse("   "), ReplInput::Empty);
        assert_eq!(ReplInput::parse("QUIT"), ReplInput::Quit);
        assert_eq!(ReplInput::parse(" quit \n"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("/agents"), ReplInput::Command("/agents"));
        assert_eq!(
            ReplInput::parse(" Why is the sky blue? "),
            ReplInput::Question("Why is the sky blue?")
        );
        // Only the bare word quits
        assert_eq!(
            ReplInput::parse("quit smoking tips"),
            ReplInput::Question("quit smoking tips")
        );
    }

    #[test]
    fn test_commands() {
        let repl = repl();
        assert!(repl.handle_command("/quit"));
        assert!(!repl.handle_command("/help"));
        assert!(!repl.handle_command("/agents"));
        assert!(!repl.handle_command("/nope"));
        assert_eq!(repl.agent_names(), vec!["ChatGPT"]);
    }

    #[tokio::test]
    async fn test_process_question_runs_protocol() {
        repl().process_question("What is 6 x 7?").await;
    }
}
