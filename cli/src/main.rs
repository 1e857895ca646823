use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli_recovery_core::{CapturedError, CorrectionKind, HostErrorKind, SuggestedCorrection};
use cli_recovery_db::{HelpIndex, SuggestionTable};
use cli_recovery_engine::{CommandRegistry, EmptyRegistry, FailureRecoveryModel, Orchestrator, display, tokenizer::ParsedCommand};
use cli_recovery_remote::{RequestContext, SuggestionService};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI-facing mirror of the structured host error kinds.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliErrorKind {
    CommandNotFound,
    ArgumentRequired,
    ValueRequired,
    Validation,
    CharacterNotAllowed,
    Unknown,
}

impl From<CliErrorKind> for HostErrorKind {
    fn from(kind: CliErrorKind) -> Self {
        match kind {
            CliErrorKind::CommandNotFound => Self::CommandNotFound,
            CliErrorKind::ArgumentRequired => Self::ArgumentRequired,
            CliErrorKind::ValueRequired => Self::ValueRequired,
            CliErrorKind::Validation => Self::Validation,
            CliErrorKind::CharacterNotAllowed => Self::CharacterNotAllowed,
            CliErrorKind::Unknown => Self::Unknown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "cli-recover")]
#[command(about = "Suggest corrected invocations after a failed host CLI command")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a failed invocation and print corrected examples.
    Suggest(SuggestArgs),
    /// Print the tool version.
    Version,
}

#[derive(Debug, Args)]
struct SuggestArgs {
    /// Raw argument tokens of the failed invocation, as typed.
    #[arg(required = true, num_args = 1.., last = true)]
    invocation: Vec<String>,
    /// Error message the host printed for the failure.
    #[arg(long)]
    error_message: Option<String>,
    /// Structured error kind the host reported, if any.
    #[arg(long, value_enum)]
    error_kind: Option<CliErrorKind>,
    /// Corrected value the host derived for a blamed parameter.
    #[arg(long)]
    suggested_value: Option<String>,
    /// Parameter (or host value-type name) the corrected value applies to.
    #[arg(long, requires = "suggested_value")]
    suggested_parameter: Option<String>,
    /// Directory with model.json, help_table.json, and toc.json overrides.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Disable ANSI styling.
    #[arg(long)]
    no_color: bool,
    /// Query the remote suggestion service at this endpoint before the
    /// local table.
    #[arg(long)]
    remote: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Suggest(args) => run_suggest(args),
        Command::Version => run_version(),
    };

    // The host already reported its own failure; this helper only ever adds
    // text, so it reports problems to stderr and still exits clean.
    if let Err(err) = result {
        eprintln!("{err}");
    }
}

fn run_version() -> Result<(), String> {
    println!("Current version: {PACKAGE_VERSION}");
    Ok(())
}

fn run_suggest(args: SuggestArgs) -> Result<(), String> {
    if args.no_color || !std::io::stdout().is_terminal() {
        display::set_styling_enabled(false);
    }

    let help = load_help(args.data_dir.as_deref());
    let table = load_table(args.data_dir.as_deref());
    let last_error = captured_error(&args);

    let model = FailureRecoveryModel::new(table);
    let registry: &dyn CommandRegistry = match &help {
        Some(index) => index,
        None => &EmptyRegistry,
    };
    let orchestrator = Orchestrator::new(registry, help.as_ref(), model);

    let remote_templates = args
        .remote
        .as_deref()
        .and_then(|endpoint| fetch_remote(endpoint, &args.invocation, registry, last_error.as_ref()));

    let output = match remote_templates {
        Some(templates) if !templates.is_empty() => {
            orchestrator.execute_with_templates(&args.invocation, last_error.as_ref(), &templates)
        }
        _ => orchestrator.run(&args.invocation, last_error.as_ref()),
    };

    if let Some(text) = output {
        println!("{text}");
    }
    Ok(())
}

fn captured_error(args: &SuggestArgs) -> Option<CapturedError> {
    if args.error_message.is_none() && args.error_kind.is_none() && args.suggested_value.is_none() {
        return None;
    }

    let suggested_fix = args.suggested_value.as_deref().map(|value| {
        SuggestedCorrection::new(
            value,
            CorrectionKind::InvalidArgument,
            args.suggested_parameter.as_deref(),
        )
    });

    Some(CapturedError {
        message: args.error_message.clone().unwrap_or_default(),
        kind: args.error_kind.map(Into::into).unwrap_or_default(),
        suggested_fix,
    })
}

fn load_help(data_dir: Option<&Path>) -> Option<HelpIndex> {
    let result = match data_dir {
        Some(dir) => HelpIndex::load(&dir.join("help_table.json"), Some(&dir.join("toc.json"))),
        None => HelpIndex::load_default(),
    };

    match result {
        Ok(index) => Some(index),
        Err(err) => {
            debug!(%err, "unable to load help dump");
            warn!("command descriptions and documentation links may not be available");
            None
        }
    }
}

fn load_table(data_dir: Option<&Path>) -> SuggestionTable {
    let result = match data_dir {
        Some(dir) => SuggestionTable::load(&dir.join("model.json")),
        None => SuggestionTable::load_default(),
    };

    match result {
        Ok(table) => table,
        Err(err) => {
            debug!(%err, "unable to load suggestion table; proceeding without one");
            SuggestionTable::new(Default::default())
        }
    }
}

/// Queries the remote service; any failure degrades to `None` so the local
/// table takes over.
fn fetch_remote(
    endpoint: &str,
    invocation: &[String],
    registry: &dyn CommandRegistry,
    last_error: Option<&CapturedError>,
) -> Option<Vec<cli_recovery_core::SuggestionTemplate>> {
    let parsed = ParsedCommand::parse(invocation, registry, last_error);
    let command = parsed.command.as_deref()?;
    let parameters = parsed.normalized_parameters.join(",");

    let service = match SuggestionService::new(Some(endpoint)) {
        Ok(service) => service,
        Err(err) => {
            debug!(%err, "unable to construct suggestion service client");
            return None;
        }
    };
    let context = RequestContext::anonymous(PACKAGE_VERSION);

    match service.fetch(command, &parameters, &context, PACKAGE_VERSION) {
        Ok(templates) => Some(templates),
        Err(err) => {
            debug!(%err, "remote suggestion request failed; using local table");
            None
        }
    }
}
