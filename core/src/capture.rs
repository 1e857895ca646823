//! The last error captured from the host CLI.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::correction::SuggestedCorrection;

static ANSI_COLOR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[^m]*m").expect("valid ANSI pattern"));

static MISSPELLED_SUBCOMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?P<subcommand>[^']+)'.*misspelled").expect("valid pattern"));

/// Removes ANSI color escape sequences from display text.
///
/// # Examples
///
/// ```
/// use cli_recovery_core::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[34m--name\x1b[0m"), "--name");
/// assert_eq!(strip_ansi_codes("plain"), "plain");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    ANSI_COLOR_CODE.replace_all(text, "").into_owned()
}

/// Structured error kind reported by the host alongside the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostErrorKind {
    /// The typed command does not exist.
    CommandNotFound,
    /// A required argument was missing.
    ArgumentRequired,
    /// A parameter was given without its value.
    ValueRequired,
    /// Request validation failed.
    Validation,
    /// A value contained a disallowed character.
    CharacterNotAllowed,
    /// The host did not report a kind.
    #[default]
    Unknown,
}

/// The last error the host emitted for the failed invocation.
///
/// Captured before classification runs; the pipeline treats it as read-only
/// input. The orchestrator receives it by injection rather than reading any
/// process-global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapturedError {
    /// Free-text error message as shown to the user.
    pub message: String,
    /// Structured error kind, when the host provided one.
    #[serde(default)]
    pub kind: HostErrorKind,
    /// Structured correction, when the host derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedCorrection>,
}

impl CapturedError {
    /// Creates a captured error with only message text.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Error message lower-cased and trimmed for classification.
    pub fn normalized_message(&self) -> String {
        self.message.trim().to_lowercase()
    }

    /// Extracts the misspelled subcommand from a command-not-found message.
    ///
    /// Returns `None` unless the structured kind is
    /// [`HostErrorKind::CommandNotFound`] and the message matches the host's
    /// `'<sub>' is misspelled …` phrasing.
    pub fn unknown_subcommand(&self) -> Option<String> {
        if self.kind != HostErrorKind::CommandNotFound {
            return None;
        }
        let message = if self.message.contains('\x1b') {
            strip_ansi_codes(&self.message)
        } else {
            self.message.clone()
        };
        MISSPELLED_SUBCOMMAND
            .captures(&message)
            .map(|caps| caps["subcommand"].trim().to_lowercase())
    }
}
