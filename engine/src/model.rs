//! Suggestion lookup over the static table.

use tracing::{debug, warn};

use cli_recovery_core::{FaultCategory, Suggestion, SuggestionTemplate};
use cli_recovery_db::{HelpIndex, SuggestionTable};

use crate::rules::RuleBasedModel;
use crate::tokenizer::ParsedCommand;

/// The failure recovery model: rule-based short-circuit plus the two-level
/// static table with reduce-style fallback.
pub struct FailureRecoveryModel {
    table: SuggestionTable,
    rule_based: RuleBasedModel,
}

impl FailureRecoveryModel {
    /// Wraps a loaded suggestion table.
    pub fn new(table: SuggestionTable) -> Self {
        Self {
            table,
            rule_based: RuleBasedModel::new(),
        }
    }

    /// Returns the raw suggestions for a classified failure.
    ///
    /// The rule-based path runs first and short-circuits the table. For
    /// resource-not-found-like categories the table key is forced to the
    /// empty string; otherwise the failing command is reduced
    /// (truncate-at-last-space) until it matches a registered key.
    /// Malformed table entries are dropped per item.
    pub fn suggestions(
        &self,
        parsed: &ParsedCommand,
        fault: FaultCategory,
        help: Option<&HelpIndex>,
    ) -> Vec<Suggestion> {
        let command = parsed.command.as_deref().unwrap_or_default();

        let mut templates = self.rule_based.suggestions(command, help);
        if templates.is_empty() {
            let key = if fault.is_resource_not_found() {
                String::new()
            } else {
                command.to_string()
            };
            let keys = self.table.category_commands(fault.as_str());
            let key = reduce(&key, &keys, ' ');
            templates = self
                .table
                .templates_for(fault.as_str(), &key)
                .map(<[SuggestionTemplate]>::to_vec)
                .unwrap_or_default();
        }

        parse_templates(&templates, help)
    }
}

/// Repeatedly truncates `entity` at its last `delimiter` until it matches one
/// of `keys` or runs out of delimiters.
///
/// This lets a suggestion registered for a command group satisfy a failure on
/// a more specific invocation.
fn reduce(entity: &str, keys: &[&str], delimiter: char) -> String {
    let mut key = entity.to_string();

    while !key.is_empty() && !keys.contains(&key.as_str()) {
        match key.rfind(delimiter) {
            Some(idx) => {
                key.truncate(idx);
                debug!(%key, "reduce operation yielded key");
            }
            None => break,
        }
    }

    key
}

/// Parses raw templates into suggestions, dropping malformed entries and
/// backfilling missing descriptions from the help index.
pub fn parse_templates(
    templates: &[SuggestionTemplate],
    help: Option<&HelpIndex>,
) -> Vec<Suggestion> {
    templates
        .iter()
        .filter_map(|template| match Suggestion::parse(template) {
            Ok(mut suggestion) => {
                if suggestion.description().is_none() {
                    if let Some(index) = help {
                        suggestion.set_description(
                            index
                                .get_description(suggestion.command())
                                .map(str::to_string),
                        );
                    }
                }
                Some(suggestion)
            }
            Err(err) => {
                warn!(%err, "dropping malformed suggestion entry");
                None
            }
        })
        .collect()
}
