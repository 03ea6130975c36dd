//! CodeForgeX CLI - Main entry point

mod document;
mod prompter;
mod settings;
mod store;

use clap::{Parser, Subcommand};
use codeforgex_core::{available_actions, Difficulty, Document, Mode, SessionRegistry};
use codeforgex_foundation::{PracticeConfig, ProviderConfig};
use codeforgex_practice::{
    Command as PracticeCommand, Outcome, PracticeCommands, PracticeDefaults, PracticeError,
};
use codeforgex_provider::Gateway;
use document::FileDocument;
use prompter::TerminalPrompter;
use settings::{select_provider, ProviderFlags};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use store::SessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CodeForgeX - LLM-generated practice questions inside your source files
#[derive(Parser, Debug)]
#[command(name = "codeforgex")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Provider to use (openai, gemini)
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Model to use
    #[arg(long, global = true)]
    model: Option<String>,

    /// API key for the provider (overrides env and config)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Difficulty to use without asking (easy, medium, hard)
    #[arg(long, global = true)]
    difficulty: Option<String>,

    /// Mode to use without asking (question-only, question-plus-hint, full-solution, multiple-approaches)
    #[arg(long, global = true)]
    mode: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert a practice question, or offer follow-up actions if one exists
    Start { file: PathBuf },
    /// Reveal the stored hint
    Hint { file: PathBuf },
    /// Append the stored solution
    Solution { file: PathBuf },
    /// Evaluate your code against the solution
    Evaluate { file: PathBuf },
    /// Replace the solution with a commented version
    Explain { file: PathBuf },
    /// Restore the plain solution
    RemoveExplanation { file: PathBuf },
    /// List the actions currently available for a file
    Actions { file: PathBuf },
    /// Start, then keep offering actions until cancelled
    Practice { file: PathBuf },
}

impl Command {
    fn file(&self) -> &Path {
        match self {
            Command::Start { file }
            | Command::Hint { file }
            | Command::Solution { file }
            | Command::Evaluate { file }
            | Command::Explain { file }
            | Command::RemoveExplanation { file }
            | Command::Actions { file }
            | Command::Practice { file } => file,
        }
    }

    /// One-shot practice command, if this is one
    fn practice_command(&self) -> Option<PracticeCommand> {
        match self {
            Command::Start { .. } => Some(PracticeCommand::StartPractice),
            Command::Hint { .. } => Some(PracticeCommand::ShowHint),
            Command::Solution { .. } => Some(PracticeCommand::ShowSolution),
            Command::Evaluate { .. } => Some(PracticeCommand::EvaluateCode),
            Command::Explain { .. } => Some(PracticeCommand::ExplainCode),
            Command::RemoveExplanation { .. } => Some(PracticeCommand::RemoveExplanation),
            Command::Actions { .. } | Command::Practice { .. } => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging (stderr, 메뉴 출력과 섞이지 않도록)
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let store = SessionStore::current_project()?;
    let mut sessions = store.load();

    let mut doc = match FileDocument::open(args.command.file()) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(path = %args.command.file().display(), error = %e, "cannot open file");
            None
        }
    };

    if let Command::Actions { .. } = args.command {
        return Ok(list_actions(doc.as_ref(), &sessions));
    }

    // Load configuration
    let practice_config = PracticeConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load practice config: {}", e);
        PracticeConfig::default()
    });
    let mut provider_config = ProviderConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load provider config: {}", e);
        ProviderConfig::default()
    });

    let flags = ProviderFlags {
        provider: args.provider.clone(),
        model: args.model.clone(),
        api_key: args.api_key.clone(),
    };
    select_provider(&mut provider_config, &practice_config, &flags)?;

    // 기본 백엔드에 키가 없으면 여기서 종료
    let gateway = Gateway::from_config(&provider_config, practice_config.temperature())?;
    let provider = gateway.default_provider()?;

    let mut defaults = PracticeDefaults::from_config(&practice_config)?;
    if let Some(difficulty) = &args.difficulty {
        defaults.difficulty = Some(difficulty.parse::<Difficulty>()?);
    }
    if let Some(mode) = &args.mode {
        defaults.mode = Some(mode.parse::<Mode>()?);
    }

    let practice =
        PracticeCommands::new(provider, Arc::new(TerminalPrompter::new())).with_defaults(defaults);

    let success = match args.command.practice_command() {
        Some(command) => {
            let result = practice
                .execute(command, doc.as_mut().map(as_document), &mut sessions)
                .await;
            persist(doc.as_ref(), &store, &sessions)?;
            finished_ok(&result)
        }
        None => match doc.as_mut() {
            Some(doc) => practice_loop(&practice, doc, &mut sessions, &store).await?,
            None => {
                let result = practice
                    .execute(PracticeCommand::StartPractice, None, &mut sessions)
                    .await;
                finished_ok(&result)
            }
        },
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn as_document(doc: &mut FileDocument) -> &mut dyn Document {
    doc
}

/// Cancelling is not a failure
fn finished_ok(result: &Result<Outcome, PracticeError>) -> bool {
    matches!(result, Ok(_) | Err(PracticeError::Cancelled))
}

/// Start, then keep routing through the action menu until the user stops
async fn practice_loop(
    practice: &PracticeCommands,
    doc: &mut FileDocument,
    sessions: &mut SessionRegistry,
    store: &SessionStore,
) -> anyhow::Result<bool> {
    loop {
        // 질문 헤더가 있으면 StartPractice는 액션 메뉴로 이어진다
        let result = practice
            .execute(PracticeCommand::StartPractice, Some(as_document(doc)), sessions)
            .await;
        persist(Some(&*doc), store, sessions)?;

        match result {
            Ok(Outcome::NoActions) | Err(PracticeError::Cancelled) => return Ok(true),
            Err(_) if !sessions.contains(&doc.id()) => return Ok(false),
            _ => {}
        }
    }
}

fn persist(
    doc: Option<&FileDocument>,
    store: &SessionStore,
    sessions: &SessionRegistry,
) -> anyhow::Result<()> {
    if let Some(doc) = doc {
        doc.save()?;
    }
    store.save(sessions)?;
    Ok(())
}

fn list_actions(doc: Option<&FileDocument>, sessions: &SessionRegistry) -> ExitCode {
    let Some(doc) = doc else {
        eprintln!("{}", PracticeError::NoActiveDocument);
        return ExitCode::FAILURE;
    };

    let actions = sessions
        .get(&doc.id())
        .map(available_actions)
        .unwrap_or_default();

    if actions.is_empty() {
        println!("No actions available.");
    } else {
        println!("\nAvailable actions for {}\n", doc.path().display());
        for action in actions {
            println!("  {}", action.label());
        }
        println!();
    }
    ExitCode::SUCCESS
}
