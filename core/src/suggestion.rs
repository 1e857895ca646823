//! Suggestion templates and their validated instances.

use serde::{Deserialize, Serialize};

use crate::HOST_PROGRAM;
use crate::error::SuggestionError;

/// Non-printing marker prefixed to a placeholder value to flag the whole
/// parameter as optional. Rendered as `[--param value]`.
pub const OPTIONAL_MARKER: char = '\u{7}';

/// Delimiter between parameter names in a template's `parameters` field.
pub const PARAMETER_DELIMITER: char = ',';

/// Delimiter between placeholder values in a template's `placeholders` field.
///
/// Placeholder values are free text and may themselves contain commas, so the
/// table format separates them with a character that cannot appear in one.
pub const PLACEHOLDER_DELIMITER: char = '♠';

/// Raw suggestion entry as stored in the static table or returned by the
/// remote service.
///
/// All fields are optional at the serde layer so that one malformed entry
/// never fails the surrounding batch; [`Suggestion::parse`] enforces which
/// fields are actually required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionTemplate {
    /// The corrected command, without the host program prefix.
    pub command: Option<String>,
    /// Comma-delimited parameter names (e.g. `"--name,--resource-group"`).
    pub parameters: Option<String>,
    /// `♠`-delimited placeholder values, one per parameter.
    pub placeholders: Option<String>,
    /// Optional display description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SuggestionTemplate {
    /// Convenience constructor for synthetic (rule-generated) templates.
    pub fn new(command: &str, parameters: &str, placeholders: &str, description: &str) -> Self {
        Self {
            command: Some(command.to_string()),
            parameters: Some(parameters.to_string()),
            placeholders: Some(placeholders.to_string()),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        }
    }
}

/// A validated corrected-command example.
///
/// Holds a command, its parameter names, and one placeholder value per
/// parameter. The parity invariant `parameters.len() == arguments.len()` is
/// established at construction and preserved by keeping the fields private;
/// any rewrite goes back through [`Suggestion::new`], which re-validates.
///
/// # Examples
///
/// ```
/// use cli_recovery_core::Suggestion;
///
/// let suggestion = Suggestion::new(
///     "group create",
///     vec!["--name".into(), "--location".into()],
///     vec!["MyResourceGroup".into()],
///     None,
/// )
/// .unwrap();
///
/// // Missing placeholders are padded with empty strings.
/// assert_eq!(suggestion.arguments(), ["MyResourceGroup", ""]);
///
/// // The reverse mismatch is a construction failure.
/// let err = Suggestion::new(
///     "group create",
///     vec!["--name".into()],
///     vec!["a".into(), "b".into()],
///     None,
/// );
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    command: String,
    parameters: Vec<String>,
    arguments: Vec<String>,
    description: Option<String>,
    command_only: bool,
}

impl Suggestion {
    /// Builds a suggestion, padding missing placeholder values with empty
    /// strings and rejecting placeholder overflow.
    pub fn new(
        command: impl Into<String>,
        parameters: Vec<String>,
        mut arguments: Vec<String>,
        description: Option<String>,
    ) -> Result<Self, SuggestionError> {
        let command_only = parameters.is_empty() && arguments.is_empty();

        if arguments.len() > parameters.len() {
            return Err(SuggestionError::PlaceholderOverflow {
                parameters: parameters.len(),
                placeholders: arguments.len(),
            });
        }
        arguments.resize(parameters.len(), String::new());

        Ok(Self {
            command: command.into(),
            parameters,
            arguments,
            description,
            command_only,
        })
    }

    /// Parses a raw template entry into a suggestion.
    ///
    /// `command`, `parameters`, and `placeholders` must all be present;
    /// absence of any is a [`SuggestionError::MissingField`]. The delimited
    /// string fields are split into positional vectors before validation.
    pub fn parse(template: &SuggestionTemplate) -> Result<Self, SuggestionError> {
        let command = template
            .command
            .as_deref()
            .ok_or(SuggestionError::MissingField("command"))?;
        let parameters = template
            .parameters
            .as_deref()
            .ok_or(SuggestionError::MissingField("parameters"))?;
        let placeholders = template
            .placeholders
            .as_deref()
            .ok_or(SuggestionError::MissingField("placeholders"))?;

        Self::new(
            command,
            split_delimited(parameters, PARAMETER_DELIMITER),
            split_delimited(placeholders, PLACEHOLDER_DELIMITER),
            template.description.clone(),
        )
    }

    /// The corrected command, without the host program prefix.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Parameter names, in display order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Placeholder values, positionally matching [`parameters`](Self::parameters).
    ///
    /// A value may carry a leading [`OPTIONAL_MARKER`].
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Display description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replaces the description, backfilling from help metadata.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// `true` when the template declared neither parameters nor placeholders.
    pub fn is_command_only(&self) -> bool {
        self.command_only
    }
}

impl std::fmt::Display for Suggestion {
    /// Formats the plain-text invocation: `az <command> --param value`, with
    /// optional-marked parameters bracketed as `[--param value]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{HOST_PROGRAM} {}", self.command)?;

        if self.command_only {
            return Ok(());
        }

        for (parameter, argument) in self.parameters.iter().zip(&self.arguments) {
            let optional = argument.starts_with(OPTIONAL_MARKER);
            let argument = argument.trim_start_matches(OPTIONAL_MARKER);

            let pair = if argument.is_empty() {
                parameter.clone()
            } else {
                format!("{parameter} {argument}")
            };
            if pair.is_empty() {
                continue;
            }
            if optional {
                write!(f, " [{pair}]")?;
            } else {
                write!(f, " {pair}")?;
            }
        }

        Ok(())
    }
}

fn split_delimited(raw: &str, delimiter: char) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(delimiter).map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(command: &str, parameters: &str, placeholders: &str) -> SuggestionTemplate {
        SuggestionTemplate::new(command, parameters, placeholders, "")
    }

    #[test]
    fn test_parse_splits_delimited_fields() {
        let suggestion = Suggestion::parse(&template(
            "storage account create",
            "--name,--resource-group",
            "mystorageaccount♠MyResourceGroup",
        ))
        .unwrap();

        assert_eq!(suggestion.parameters(), ["--name", "--resource-group"]);
        assert_eq!(suggestion.arguments(), ["mystorageaccount", "MyResourceGroup"]);
        assert_eq!(suggestion.parameters().len(), suggestion.arguments().len());
    }

    #[test]
    fn test_parse_missing_field_is_parse_failure() {
        let incomplete = SuggestionTemplate {
            command: Some("group create".into()),
            parameters: Some("--name".into()),
            placeholders: None,
            description: None,
        };
        let err = Suggestion::parse(&incomplete).unwrap_err();
        assert!(matches!(err, SuggestionError::MissingField("placeholders")));
    }

    #[test]
    fn test_placeholder_overflow_is_invalid() {
        let err = Suggestion::new(
            "group create",
            vec!["--name".into(), "--location".into()],
            vec!["a".into(), "b".into(), "c".into()],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SuggestionError::PlaceholderOverflow { .. }));
    }

    #[test]
    fn test_missing_placeholders_padded() {
        let suggestion = Suggestion::parse(&template("vm create", "--name,--image", "MyVm")).unwrap();
        assert_eq!(suggestion.arguments(), ["MyVm", ""]);
    }

    #[test]
    fn test_fewer_placeholders_than_parameters_fails_when_reversed() {
        // parameters=["--name","--location"], placeholders=["foo"] pads;
        // the overflow direction fails.
        let ok = Suggestion::new(
            "group create",
            vec!["--name".into(), "--location".into()],
            vec!["foo".into()],
            None,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_display_brackets_optional_parameters() {
        let suggestion = Suggestion::new(
            "group create",
            vec!["--name".into(), "--tags".into()],
            vec!["MyResourceGroup".into(), format!("{OPTIONAL_MARKER}key=value")],
            None,
        )
        .unwrap();

        assert_eq!(
            suggestion.to_string(),
            "az group create --name MyResourceGroup [--tags key=value]"
        );
    }

    #[test]
    fn test_display_command_only() {
        let suggestion = Suggestion::parse(&template("storage account", "", "")).unwrap();
        assert!(suggestion.is_command_only());
        assert_eq!(suggestion.to_string(), "az storage account");
    }

    #[test]
    fn test_display_parameter_without_value() {
        let suggestion = Suggestion::parse(&template("storage account", "--help", "")).unwrap();
        assert_eq!(suggestion.to_string(), "az storage account --help");
    }
}
