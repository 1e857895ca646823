//! Wires the recovery pipeline together, once per failed invocation.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use cli_recovery_core::{CapturedError, SuggestionTemplate};
use cli_recovery_db::HelpIndex;

use crate::classifier::classify_captured;
use crate::display;
use crate::model::FailureRecoveryModel;
use crate::personalize::personalize;
use crate::registry::CommandRegistry;
use crate::tokenizer::ParsedCommand;

/// The host may emit more than one post-execution signal per command; only
/// the first run of the pipeline produces output.
static RECOVERY_RAN: AtomicBool = AtomicBool::new(false);

/// Runs the full recovery pipeline for one failed invocation.
///
/// All collaborators are injected: the command registry, the optional help
/// index, and the suggestion model. The orchestrator never consults global
/// host state and never alters the host's exit status; its only effect is
/// the returned supplementary text.
pub struct Orchestrator<'a> {
    registry: &'a dyn CommandRegistry,
    help: Option<&'a HelpIndex>,
    model: FailureRecoveryModel,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator from its collaborators.
    pub fn new(
        registry: &'a dyn CommandRegistry,
        help: Option<&'a HelpIndex>,
        model: FailureRecoveryModel,
    ) -> Self {
        Self {
            registry,
            help,
            model,
        }
    }

    /// Runs the pipeline, debounced process-wide.
    ///
    /// The second and later calls within one process return `None` without
    /// doing any work.
    pub fn run(&self, args: &[String], last_error: Option<&CapturedError>) -> Option<String> {
        if RECOVERY_RAN.swap(true, Ordering::SeqCst) {
            debug!("recovery already ran in this process; skipping");
            return None;
        }
        self.execute(args, last_error)
    }

    /// Runs the pipeline without the process-wide debounce.
    ///
    /// For embedders that manage their own once-per-failure signal.
    pub fn execute(&self, args: &[String], last_error: Option<&CapturedError>) -> Option<String> {
        self.execute_inner(args, last_error, None)
    }

    /// Like [`execute`](Self::execute), but sources raw templates from the
    /// caller (e.g. a remote suggestion service) instead of the local table.
    pub fn execute_with_templates(
        &self,
        args: &[String],
        last_error: Option<&CapturedError>,
        templates: &[SuggestionTemplate],
    ) -> Option<String> {
        self.execute_inner(args, last_error, Some(templates))
    }

    fn execute_inner(
        &self,
        args: &[String],
        last_error: Option<&CapturedError>,
        templates: Option<&[SuggestionTemplate]>,
    ) -> Option<String> {
        let parsed = ParsedCommand::parse(args, self.registry, last_error);

        // No command could be extracted; nothing to suggest against.
        let command = parsed.command.clone()?;

        let fault = classify_captured(last_error);
        if let Some(subcommand) = last_error.and_then(CapturedError::unknown_subcommand) {
            debug!(%subcommand, "host flagged a misspelled subcommand");
        }
        let suggestions = match templates {
            Some(templates) => crate::model::parse_templates(templates, self.help),
            None => self.model.suggestions(&parsed, fault, self.help),
        };
        let suggestions = personalize(suggestions, &parsed, self.help, last_error, fault);

        let link = self.help.and_then(|index| {
            let keyword = if parsed.is_valid_command {
                command.as_str()
            } else {
                parsed.command_group.as_str()
            };
            if keyword.is_empty() {
                None
            } else {
                index.generate_link(keyword)
            }
        });

        match display::format_suggestions(&suggestions, link.as_ref()) {
            Some(text) => Some(text),
            None if self.registry.has_command_with_prefix(&command) => {
                Some(display::unable_to_help(&command))
            }
            None => None,
        }
    }
}
