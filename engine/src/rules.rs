//! Hand-written suggestion rules that bypass the static table.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use cli_recovery_core::{HOST_PROGRAM, SuggestionTemplate};
use cli_recovery_db::HelpIndex;

static INVALID_HELP_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<target>[a-z\s-]+)\s+help$").expect("valid help-call pattern")
});

type RuleHandler = fn(&Captures<'_>, Option<&HelpIndex>) -> Vec<SuggestionTemplate>;

/// Synthesizes suggestions directly from the parsed input when one of a
/// small set of patterns matches the attempted command.
///
/// Runs before the static table and short-circuits it on a hit.
pub struct RuleBasedModel {
    rules: Vec<(&'static LazyLock<Regex>, RuleHandler)>,
}

impl RuleBasedModel {
    /// Creates the model with its built-in rule set.
    pub fn new() -> Self {
        Self {
            rules: vec![(&INVALID_HELP_CALL, handle_invalid_help_call)],
        }
    }

    /// Applies the rules to the attempted command; first match wins.
    pub fn suggestions(&self, command: &str, help: Option<&HelpIndex>) -> Vec<SuggestionTemplate> {
        for (rule, handler) in &self.rules {
            if let Some(caps) = rule.captures(command) {
                let templates = handler(&caps, help);
                if !templates.is_empty() {
                    debug!(command, "rule-based suggestion produced");
                    return templates;
                }
            }
        }
        Vec::new()
    }
}

impl Default for RuleBasedModel {
    fn default() -> Self {
        Self::new()
    }
}

/// `<command-or-group> help` is not how the host spells help; point the user
/// at `--help` when the target actually exists.
fn handle_invalid_help_call(
    caps: &Captures<'_>,
    help: Option<&HelpIndex>,
) -> Vec<SuggestionTemplate> {
    let target = caps["target"].trim();

    match help {
        Some(index) if index.contains(target) => vec![SuggestionTemplate::new(
            target,
            "--help",
            "",
            &format!("Show help for {HOST_PROGRAM} {target}"),
        )],
        _ => Vec::new(),
    }
}
