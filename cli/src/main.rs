//! CLI entrypoint for llm-consensus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use consensus_application::{
    ConsensusParams, ConsensusProgressNotifier, DispatchMode, NoProgress, RunConsensusUseCase,
};
use consensus_domain::{OutputFormat, Question};
use consensus_infrastructure::{AgentFactory, ConfigLoader, FileConfig};
use consensus_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a .env file next to the invocation
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    info!("Starting llm-consensus");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", config.to_toml().context("Failed to render configuration")?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let params = apply_overrides(config.consensus.to_params(), &cli);
    let format = output_format(&cli, &config);
    let preview_chars = config.output.preview_chars;

    // === Dependency Injection ===
    let factory = AgentFactory::new()?;
    let registry = factory.build_registry(&config.agents, &cli.agent)?;
    let use_case = RunConsensusUseCase::new(registry, params)?;

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(use_case)
            .with_progress(!cli.quiet)
            .with_format(format)
            .with_preview_chars(preview_chars);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question.map(Question::new) else {
        bail!("Question is required. Use --chat for interactive mode.");
    };
    if question.is_blank() {
        bail!("Question is empty.");
    }

    if !cli.quiet {
        print_header(&question, &use_case);
    }

    let progress: Box<dyn ConsensusProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new().with_preview_chars(preview_chars))
    } else {
        Box::new(SimpleProgress::new().with_preview_chars(preview_chars))
    };

    let outcome = use_case
        .execute_with_progress(question, progress.as_ref())
        .await;

    println!("{}", ConsoleFormatter::format(&outcome, format));

    Ok(())
}

/// Install the tracing subscriber.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// CLI flags win over configuration.
fn apply_overrides(mut params: ConsensusParams, cli: &Cli) -> ConsensusParams {
    if let Some(max) = cli.max_iterations {
        params = params.with_max_iterations(max);
    }
    if let Some(secs) = cli.timeout {
        params = params.with_agent_timeout(Some(Duration::from_secs(secs)));
    }
    if cli.parallel {
        params = params.with_dispatch(DispatchMode::Concurrent);
    }
    params
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    cli.output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default()
}

fn print_header(question: &Question, use_case: &RunConsensusUseCase) {
    let agents: Vec<&str> = use_case.registry().ids().map(|id| id.as_str()).collect();

    eprintln!();
    eprintln!("+============================================================+");
    eprintln!("|              LLM Consensus - Multi-Model Agreement         |");
    eprintln!("+============================================================+");
    eprintln!();
    eprintln!("Question: {}", question);
    eprintln!("Agents: {}", agents.join(", "));
    eprintln!(
        "Max iterations: {}",
        use_case.params().max_iterations
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llm-consensus").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let base = ConsensusParams::default().with_max_iterations(3);
        assert_eq!(apply_overrides(base.clone(), &cli(&["q"])), base);
    }

    #[test]
    fn test_cli_overrides() {
        let params = apply_overrides(
            ConsensusParams::default(),
            &cli(&["-n", "2", "--timeout", "15", "--parallel", "q"]),
        );
        assert_eq!(params.max_iterations, 2);
        assert_eq!(params.agent_timeout, Some(Duration::from_secs(15)));
        assert_eq!(params.dispatch, DispatchMode::Concurrent);
    }

    #[test]
    fn test_output_format_precedence() {
        let mut config = FileConfig::default();
        assert_eq!(output_format(&cli(&["q"]), &config), OutputFormat::Answer);

        config.output.format = Some(OutputFormat::Full);
        assert_eq!(output_format(&cli(&["q"]), &config), OutputFormat::Full);
        assert_eq!(
            output_format(&cli(&["-o", "json", "q"]), &config),
            OutputFormat::Json
        );
    }
}
