//! Suggestion personalization.
//!
//! Rewrites generic suggestions using the user's actual input: substitutes
//! typed and autocorrected values, marks untyped optional parameters,
//! promotes untyped required parameters, borrows compatible parameters from
//! the failing command, and orders everything by where the user put it.
//!
//! The steps run as an ordered pipeline applied independently to each
//! suggestion; a suggestion is rebuilt through the validating constructor
//! only when its content actually changed, so re-running the pipeline on an
//! already-personalized list is a no-op.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use cli_recovery_core::{
    CapturedError, FaultCategory, OPTIONAL_MARKER, Suggestion, strip_ansi_codes,
};
use cli_recovery_db::HelpIndex;

use crate::parameter::{is_global_parameter, preferred_parameter};
use crate::tokenizer::ParsedCommand;

/// Rank assigned to parameters the user never typed; sorts last.
const INFINITE_RANK: i64 = i64::MAX;

/// Minimum description similarity for two parameters to count as equivalent.
const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Boilerplate phrasing stripped from parameter descriptions before
/// similarity comparison.
static DESCRIPTION_BOILERPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"You can configure[^$]+$|the|new").expect("valid pattern"));

fn reduce_description(description: &str) -> String {
    DESCRIPTION_BOILERPLATE
        .replace_all(description, "")
        .into_owned()
}

/// Checks whether the error message blames a parameter, in any of its
/// dashed, underscored, or dashless spellings.
fn mentioned_in_error(parameter: &str, last_error: Option<&CapturedError>) -> bool {
    let Some(error) = last_error else {
        return false;
    };
    let variants = [
        parameter.to_string(),
        parameter.replace('-', "_"),
        parameter.replace('-', ""),
    ];
    variants.iter().any(|variant| error.message.contains(variant))
}

/// Rewrites each suggestion to reflect the user's actual input.
///
/// See the module docs for the pipeline steps. The returned list preserves
/// lookup order; only parameters within a suggestion are reordered.
pub fn personalize(
    suggestions: Vec<Suggestion>,
    parsed: &ParsedCommand,
    help: Option<&HelpIndex>,
    last_error: Option<&CapturedError>,
    fault: FaultCategory,
) -> Vec<Suggestion> {
    // Rank of each normalized parameter in the user's input; shared across
    // suggestions so a required-parameter promotion holds for all of them.
    let mut parameter_rank: HashMap<String, i64> = parsed
        .normalized_parameters
        .iter()
        .enumerate()
        .map(|(rank, parameter)| (parameter.clone(), rank as i64))
        .collect();

    let mut result: Vec<Suggestion> = suggestions
        .into_iter()
        .map(|suggestion| personalize_one(suggestion, parsed, help, last_error, &mut parameter_rank))
        .collect();

    // A character-level input validation failure is about the command the
    // user attempted; unrelated commands only confuse.
    if fault == FaultCategory::CharacterNotAllowed {
        if let Some(attempted) = parsed.command.as_deref() {
            result.retain(|suggestion| {
                strip_ansi_codes(suggestion.command()).starts_with(attempted)
            });
        }
    }

    result
}

fn personalize_one(
    suggestion: Suggestion,
    parsed: &ParsedCommand,
    help: Option<&HelpIndex>,
    last_error: Option<&CapturedError>,
    parameter_rank: &mut HashMap<String, i64>,
) -> Suggestion {
    let rank_of = |ranks: &HashMap<String, i64>, parameter: &str| {
        ranks.get(parameter).copied().unwrap_or(INFINITE_RANK)
    };

    // Step 1: strip display formatting before any matching logic.
    let command = strip_ansi_codes(suggestion.command());
    let mut parameters: Vec<String> = suggestion
        .parameters()
        .iter()
        .map(|p| strip_ansi_codes(p))
        .collect();
    let mut placeholders: Vec<String> = suggestion
        .arguments()
        .iter()
        .map(|a| strip_ansi_codes(a))
        .collect();
    let original_parameters = parameters.clone();
    let original_placeholders = placeholders.clone();

    let mut suggested: HashSet<String> = parameters.iter().cloned().collect();
    let user_specified: HashSet<&str> = parsed
        .normalized_parameters
        .iter()
        .map(String::as_str)
        .collect();

    if let Some(index) = help {
        if index.parameter_table(&command).is_some() {
            let required_aliases = index.required_aliases(&command);

            // Step 2: mark suggested-optional parameters the user did not
            // type. The marker renders as bracketing later.
            for (idx, parameter) in parameters.iter().enumerate() {
                let optional = !required_aliases.contains(parameter);
                let typed = user_specified.contains(parameter.as_str());
                if optional && !typed && !placeholders[idx].starts_with(OPTIONAL_MARKER) {
                    placeholders[idx] = format!("{OPTIONAL_MARKER}{}", placeholders[idx]);
                }
            }

            // Step 3: promote untyped required parameters to just before the
            // lowest-ranked optional (or just after the highest-ranked
            // required, whichever is tighter).
            let min_optional_rank = parameters
                .iter()
                .filter(|p| !required_aliases.contains(*p))
                .map(|p| rank_of(parameter_rank, p))
                .min()
                .filter(|&rank| rank != INFINITE_RANK)
                .unwrap_or(1);
            let max_required_rank = parameters
                .iter()
                .filter(|p| required_aliases.contains(*p))
                .map(|p| rank_of(parameter_rank, p))
                .max()
                .filter(|&rank| rank != INFINITE_RANK)
                .unwrap_or(0);
            let promoted_rank = (min_optional_rank - 1).min(max_required_rank + 1);

            for parameter in &parameters {
                if required_aliases.contains(parameter)
                    && !user_specified.contains(parameter.as_str())
                {
                    parameter_rank.insert(parameter.clone(), promoted_rank);
                }
            }
        }

        // Step 4: borrow parameters the user typed that are also valid on
        // the suggested command, as long as the error did not blame them,
        // they are not global, and their meaning matches.
        if let Some(failing_command) = parsed.command.as_deref() {
            if let (Some(suggested_tbl), Some(_failing_tbl)) = (
                index.parameter_table(&command),
                index.parameter_table(failing_command),
            ) {
                let valid_parameters: HashSet<&str> = suggested_tbl
                    .keys()
                    .map(String::as_str)
                    .chain(
                        suggested_tbl
                            .values()
                            .flat_map(|info| info.aliases.iter().map(String::as_str)),
                    )
                    .collect();

                for (parameter, argument) in
                    parsed.normalized_parameters.iter().zip(&parsed.arguments)
                {
                    if !valid_parameters.contains(parameter.as_str()) {
                        continue;
                    }

                    let failing_info = index.parameter_by_alias(failing_command, parameter);
                    let suggested_info = index.parameter_by_alias(&command, parameter);
                    let failing_summary = failing_info.and_then(|info| info.summary.as_deref());
                    let suggested_summary = suggested_info.and_then(|info| info.summary.as_deref());

                    let mut equivalent = failing_summary == suggested_summary;
                    if let (Some(failing), Some(suggested_desc)) =
                        (failing_summary, suggested_summary)
                    {
                        if !equivalent {
                            let ratio = strsim::normalized_levenshtein(
                                &reduce_description(failing),
                                &reduce_description(suggested_desc),
                            );
                            equivalent = ratio >= SIMILARITY_THRESHOLD;
                        }
                    }

                    let alias_already_suggested = suggested_info.is_some_and(|info| {
                        info.aliases.iter().any(|alias| suggested.contains(alias))
                    });

                    if !suggested.contains(parameter.as_str())
                        && !alias_already_suggested
                        && !mentioned_in_error(parameter, last_error)
                        && !is_global_parameter(parameter)
                        && equivalent
                    {
                        parameters.push(parameter.clone());
                        placeholders.push(argument.clone());
                    }
                }
            }
        }
    } else {
        debug!("no help table loaded; personalization based on user input may be impacted");
    }

    // Step 5: substitute autocorrected or typed values, canonicalize the
    // spelling back to what the user wrote, or fall back to the per-group
    // preference table. Ranks are recorded against the pre-substitution
    // normalized name.
    let mut ranks: Vec<i64> = Vec::with_capacity(parameters.len());
    for idx in 0..parameters.len() {
        let normalized = parameters[idx].clone();
        suggested.insert(normalized.clone());

        let mut substituted = false;
        if let Some(entry) = parsed.correction_for(&normalized) {
            let argument = if entry.autocorrected_argument.is_empty() {
                entry.argument.clone()
            } else {
                entry.autocorrected_argument.clone()
            };
            let autocorrection_differs = entry.autocorrected_argument != entry.argument;
            if !argument.is_empty()
                && (!mentioned_in_error(&normalized, last_error) || autocorrection_differs)
            {
                placeholders[idx] = argument;
                parameters[idx] = entry.parameter.clone();
                substituted = true;
            }
        }
        if !substituted {
            if let Some(preferred) = preferred_parameter(&parsed.command_group, &normalized) {
                parameters[idx] = preferred.to_string();
            }
        }

        ranks.push(rank_of(parameter_rank, &normalized));
    }

    // Step 6: stable ascending rank sort; ties keep first-appearance order.
    let mut order: Vec<usize> = (0..parameters.len()).collect();
    order.sort_by_key(|&idx| ranks[idx]);
    let sorted_parameters: Vec<String> = order.iter().map(|&idx| parameters[idx].clone()).collect();
    let sorted_placeholders: Vec<String> =
        order.iter().map(|&idx| placeholders[idx].clone()).collect();

    let changed = command != suggestion.command()
        || sorted_parameters != original_parameters
        || sorted_placeholders != original_placeholders;
    if !changed {
        return suggestion;
    }

    match Suggestion::new(
        command.clone(),
        sorted_parameters,
        sorted_placeholders,
        suggestion.description().map(str::to_string),
    ) {
        Ok(mut rebuilt) => {
            if rebuilt.description().is_none() {
                if let Some(index) = help {
                    rebuilt.set_description(
                        index.get_description(rebuilt.command()).map(str::to_string),
                    );
                }
            }
            rebuilt
        }
        Err(err) => {
            debug!(%err, "personalized rewrite failed validation; keeping original");
            suggestion
        }
    }
}
