//! Best-effort tokenizer for the failed command line.
//!
//! Breaks the raw argument tokens into a command-group prefix, a command, and
//! positionally matched (flag, value) pairs. This is a regex splitter, not a
//! full parser: the host already rejected the input, so the goal is to
//! recover as much structure as possible from whatever was typed.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use cli_recovery_core::CapturedError;

use crate::registry::CommandRegistry;

/// One or more lowercase dash-separated words at the start of the input.
static COMMAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z][a-z-]+ ?)+").expect("valid command pattern"));

/// A short or long flag, optionally followed by a value token.
///
/// Value tokens are a double- or single-quoted string (escapes preserved
/// verbatim) or a bare non-whitespace run that does not start with a dash.
static ARGUMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<parameter>-{1,2}[a-z][A-Za-z-]*)(?:[ \t](?P<argument>"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|[^-\s]\S*))?"#,
    )
    .expect("valid argument pattern")
});

/// One row of the correction table built during tokenization.
#[derive(Debug, Clone)]
pub struct ParseTableEntry {
    /// The flag exactly as the user typed it.
    pub parameter: String,
    /// Canonical long-form spelling.
    pub normalized_parameter: String,
    /// The value the user typed, possibly empty.
    pub argument: String,
    /// The value after applying the host's suggested correction, when one
    /// targeted this parameter; otherwise equal to `argument`.
    pub autocorrected_argument: String,
}

/// The failed invocation broken into command and (flag, value) components.
///
/// Invariant: `parameters`, `arguments`, and `normalized_parameters` have
/// equal length, with pairwise-corresponding positions. The struct is built
/// once per failed invocation and read-only afterwards.
#[derive(Debug)]
pub struct ParsedCommand {
    /// Greedy longest-valid-prefix of known command groups, possibly empty.
    pub command_group: String,
    /// The command span, lower-cased and trimmed; `None` when the input does
    /// not look like a command at all.
    pub command: Option<String>,
    /// Whether the extracted command exists in the host command table.
    pub is_valid_command: bool,
    /// Flags as typed, in order of appearance.
    pub parameters: Vec<String>,
    /// Values as typed, positionally matching `parameters` (empty string for
    /// valueless flags).
    pub arguments: Vec<String>,
    /// Canonical long-form flag spellings, positionally matching
    /// `parameters`. Unrecognized flags are retained as typed.
    pub normalized_parameters: Vec<String>,
    parse_table: HashMap<String, ParseTableEntry>,
}

impl ParsedCommand {
    /// Tokenizes the raw argument list of the failed invocation.
    pub fn parse(
        args: &[String],
        registry: &dyn CommandRegistry,
        last_error: Option<&CapturedError>,
    ) -> Self {
        let command_group = extract_command_group(args, registry);
        let input = args.join(" ");

        let command = COMMAND_PATTERN
            .find(&input)
            .map(|m| m.as_str().trim().to_lowercase());
        let is_valid_command = command
            .as_deref()
            .is_some_and(|command| registry.is_command(command));

        let mut parameters = Vec::new();
        let mut arguments = Vec::new();
        for caps in ARGUMENT_PATTERN.captures_iter(&input) {
            parameters.push(caps["parameter"].to_string());
            arguments.push(
                caps.name("argument")
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            );
        }
        debug!(?parameters, "parsed parameters");
        debug!(?arguments, "parsed arguments");

        let normalized_parameters: Vec<String> = parameters
            .iter()
            .map(|parameter| {
                command
                    .as_deref()
                    .and_then(|command| registry.normalize_parameter(command, parameter))
                    .unwrap_or_else(|| parameter.clone())
            })
            .collect();
        debug!(?normalized_parameters, "normalized parameters");

        let parse_table = build_parse_table(
            &parameters,
            &normalized_parameters,
            &arguments,
            last_error,
        );

        Self {
            command_group,
            command,
            is_valid_command,
            parameters,
            arguments,
            normalized_parameters,
            parse_table,
        }
    }

    /// Correction-table row for a normalized parameter, if the user typed it.
    pub fn correction_for(&self, normalized_parameter: &str) -> Option<&ParseTableEntry> {
        self.parse_table.get(normalized_parameter)
    }

    /// Re-joins the parsed components into a single command line.
    pub fn rejoin(&self) -> String {
        let mut buffer = vec![self.command.clone().unwrap_or_default()];
        for (parameter, argument) in self.parameters.iter().zip(&self.arguments) {
            buffer.push(parameter.clone());
            if !argument.is_empty() {
                buffer.push(argument.clone());
            }
        }
        buffer.retain(|token| !token.is_empty());
        buffer.join(" ")
    }
}

/// Extends a running prefix one token at a time while it names a known
/// command group, stopping at the first token that does not extend one.
fn extract_command_group(tokens: &[String], registry: &dyn CommandRegistry) -> String {
    let mut command_group = String::new();

    for token in tokens {
        let candidate = if command_group.is_empty() {
            token.clone()
        } else {
            format!("{command_group} {token}")
        };
        if registry.is_command_group(&candidate) {
            command_group = candidate;
        } else {
            break;
        }
    }

    command_group
}

fn build_parse_table(
    parameters: &[String],
    normalized_parameters: &[String],
    arguments: &[String],
    last_error: Option<&CapturedError>,
) -> HashMap<String, ParseTableEntry> {
    let suggested_fix = last_error.and_then(|error| error.suggested_fix.as_ref());
    let mut table = HashMap::new();

    for ((parameter, normalized), argument) in parameters
        .iter()
        .zip(normalized_parameters)
        .zip(arguments)
    {
        let mut autocorrected_argument = argument.clone();
        if let Some(fix) = suggested_fix {
            if fix.target_parameter.as_deref() == Some(normalized.as_str())
                && !fix.suggested_value.is_empty()
            {
                autocorrected_argument = fix.suggested_value.clone();
            }
        }

        table.insert(
            normalized.clone(),
            ParseTableEntry {
                parameter: parameter.clone(),
                normalized_parameter: normalized.clone(),
                argument: argument.clone(),
                autocorrected_argument,
            },
        );
    }

    debug!(entries = table.len(), "parse table generated");
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EmptyRegistry;
    use cli_recovery_core::{CorrectionKind, SuggestedCorrection};
    use cli_recovery_db::{HelpEntry, HelpIndex};
    use std::collections::HashMap as StdHashMap;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn sample_registry() -> HelpIndex {
        let help = r#"{
            "storage account create": {
                "parameters": {
                    "--name": {"name": ["--name", "-n"], "required": true},
                    "--resource-group": {"name": ["--resource-group", "-g"], "required": true}
                }
            },
            "group create": {
                "parameters": {
                    "--name": {"name": ["--name", "-n", "--resource-group", "-g"], "required": true},
                    "--location": {"name": ["--location", "-l"], "required": true}
                }
            }
        }"#;
        let entries: StdHashMap<String, HelpEntry> = serde_json::from_str(help).unwrap();
        HelpIndex::new(entries, None).unwrap()
    }

    #[test]
    fn test_command_and_pairs_extracted() {
        let registry = sample_registry();
        let parsed = ParsedCommand::parse(
            &args(&["storage", "account", "create", "-n", "myaccount", "-g", "MyGroup"]),
            &registry,
            None,
        );

        assert_eq!(parsed.command.as_deref(), Some("storage account create"));
        assert!(parsed.is_valid_command);
        assert_eq!(parsed.parameters, ["-n", "-g"]);
        assert_eq!(parsed.arguments, ["myaccount", "MyGroup"]);
        assert_eq!(parsed.normalized_parameters, ["--name", "--resource-group"]);
        assert_eq!(parsed.parameters.len(), parsed.normalized_parameters.len());
    }

    #[test]
    fn test_command_group_longest_valid_prefix() {
        let registry = sample_registry();
        let parsed = ParsedCommand::parse(
            &args(&["storage", "account", "create", "-n", "x"]),
            &registry,
            None,
        );
        assert_eq!(parsed.command_group, "storage account");
    }

    #[test]
    fn test_no_command_when_pattern_misses() {
        let parsed = ParsedCommand::parse(&args(&["--help"]), &EmptyRegistry, None);
        assert_eq!(parsed.command, None);
        assert!(!parsed.is_valid_command);
    }

    #[test]
    fn test_quoted_value_kept_verbatim() {
        let parsed = ParsedCommand::parse(
            &args(&["group", "create", "--name", r#""my \"quoted\" group""#]),
            &EmptyRegistry,
            None,
        );
        assert_eq!(parsed.arguments, [r#""my \"quoted\" group""#]);
    }

    #[test]
    fn test_flag_followed_by_flag_has_empty_argument() {
        let parsed = ParsedCommand::parse(
            &args(&["group", "delete", "--yes", "--name", "MyGroup"]),
            &EmptyRegistry,
            None,
        );
        assert_eq!(parsed.parameters, ["--yes", "--name"]);
        assert_eq!(parsed.arguments, ["", "MyGroup"]);
    }

    #[test]
    fn test_unrecognized_flag_retained() {
        let registry = sample_registry();
        let parsed = ParsedCommand::parse(
            &args(&["storage", "account", "create", "--bogus", "x"]),
            &registry,
            None,
        );
        assert_eq!(parsed.normalized_parameters, ["--bogus"]);
    }

    #[test]
    fn test_correction_applied_to_matching_parameter() {
        let registry = sample_registry();
        let error = CapturedError {
            message: "parameter 'resource_group_name' must conform to the following pattern".into(),
            kind: Default::default(),
            suggested_fix: Some(SuggestedCorrection::new(
                "valid-rg",
                CorrectionKind::InvalidArgument,
                Some("resource_group_name"),
            )),
        };
        let parsed = ParsedCommand::parse(
            &args(&["storage", "account", "create", "-g", "bad*rg", "-n", "acct"]),
            &registry,
            Some(&error),
        );

        let entry = parsed.correction_for("--resource-group").unwrap();
        assert_eq!(entry.argument, "bad*rg");
        assert_eq!(entry.autocorrected_argument, "valid-rg");

        let untouched = parsed.correction_for("--name").unwrap();
        assert_eq!(untouched.autocorrected_argument, untouched.argument);
    }

    #[test]
    fn test_rejoin_round_trips() {
        let registry = sample_registry();
        let original = args(&["storage", "account", "create", "-n", "myaccount", "-g", "MyGroup"]);
        let parsed = ParsedCommand::parse(&original, &registry, None);

        let rejoined = parsed.rejoin();
        let tokens: Vec<String> = rejoined.split_whitespace().map(str::to_string).collect();
        let reparsed = ParsedCommand::parse(&tokens, &registry, None);

        assert_eq!(reparsed.command, parsed.command);
        assert_eq!(reparsed.parameters, parsed.parameters);
        assert_eq!(reparsed.arguments, parsed.arguments);
        assert_eq!(reparsed.normalized_parameters, parsed.normalized_parameters);
    }
}
