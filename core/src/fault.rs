//! Fault categories for failed host invocations.

use serde::{Deserialize, Serialize};

use crate::capture::HostErrorKind;

/// Classification of why the host command failed.
///
/// Derived once per failure from the captured error text and never re-derived
/// mid-pipeline. The serialized names double as the first-level keys of the
/// static suggestion table.
///
/// # Examples
///
/// ```
/// use cli_recovery_core::FaultCategory;
///
/// assert_eq!(FaultCategory::Unknown.as_str(), "Unknown");
/// assert!(FaultCategory::ResourceGroupNotFound.is_resource_not_found());
/// assert!(!FaultCategory::InvalidOutputType.is_resource_not_found());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FaultCategory {
    /// A parameter was given without its expected value.
    ExpectedArgument,
    /// One or more arguments were not recognized by the host parser.
    UnrecognizedArguments,
    /// A request failed server-side validation.
    ValidationError,
    /// The subcommand does not exist under the given command group.
    UnknownSubcommand,
    /// Required parameters were missing from the invocation.
    MissingRequiredParameters,
    /// A command group was invoked without a required subcommand.
    MissingRequiredSubcommand,
    /// The host parser could not make sense of the input at all.
    UnableToParseCommandInput,
    /// A named storage account does not exist.
    StorageAccountNotFound,
    /// A named resource group does not exist.
    ResourceGroupNotFound,
    /// Some other resource does not exist.
    AzureResourceNotFound,
    /// The `--query` JMESPath expression failed to parse.
    #[serde(rename = "InvalidJMESPathQuery")]
    InvalidJmesPathQuery,
    /// The `--output` format is not one of the supported values.
    InvalidOutputType,
    /// A parameter value failed pattern or choice validation.
    InvalidParameterValue,
    /// A datetime-typed argument value failed to parse.
    InvalidDateTimeArgumentValue,
    /// A resource group name failed pattern validation.
    InvalidResourceGroupName,
    /// An account name failed pattern validation.
    InvalidAccountName,
    /// A value contains a character the service does not allow.
    CharacterNotAllowed,
    /// The command itself does not exist (structured host kind only).
    CommandNotFound,
    /// The host reported a missing argument via its structured error kind.
    ArgumentRequired,
    /// The host reported a missing value via its structured error kind.
    ValueRequired,
    /// No rule matched the error text.
    #[default]
    Unknown,
}

impl FaultCategory {
    /// Returns the serialized name, as used for suggestion table keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpectedArgument => "ExpectedArgument",
            Self::UnrecognizedArguments => "UnrecognizedArguments",
            Self::ValidationError => "ValidationError",
            Self::UnknownSubcommand => "UnknownSubcommand",
            Self::MissingRequiredParameters => "MissingRequiredParameters",
            Self::MissingRequiredSubcommand => "MissingRequiredSubcommand",
            Self::UnableToParseCommandInput => "UnableToParseCommandInput",
            Self::StorageAccountNotFound => "StorageAccountNotFound",
            Self::ResourceGroupNotFound => "ResourceGroupNotFound",
            Self::AzureResourceNotFound => "AzureResourceNotFound",
            Self::InvalidJmesPathQuery => "InvalidJMESPathQuery",
            Self::InvalidOutputType => "InvalidOutputType",
            Self::InvalidParameterValue => "InvalidParameterValue",
            Self::InvalidDateTimeArgumentValue => "InvalidDateTimeArgumentValue",
            Self::InvalidResourceGroupName => "InvalidResourceGroupName",
            Self::InvalidAccountName => "InvalidAccountName",
            Self::CharacterNotAllowed => "CharacterNotAllowed",
            Self::CommandNotFound => "CommandNotFound",
            Self::ArgumentRequired => "ArgumentRequired",
            Self::ValueRequired => "ValueRequired",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns `true` for categories modeled as command-independent lookups.
    ///
    /// For these, the suggestion table is keyed by the empty string rather
    /// than the failing command.
    pub fn is_resource_not_found(&self) -> bool {
        matches!(
            self,
            Self::InvalidResourceGroupName
                | Self::InvalidAccountName
                | Self::AzureResourceNotFound
                | Self::StorageAccountNotFound
                | Self::ResourceGroupNotFound
        )
    }

    /// Maps a structured host error kind to a category.
    ///
    /// Consulted only when no error message text was captured; message-based
    /// classification always takes precedence.
    pub fn from_host_kind(kind: HostErrorKind) -> Self {
        match kind {
            HostErrorKind::CommandNotFound => Self::CommandNotFound,
            HostErrorKind::ArgumentRequired => Self::ArgumentRequired,
            HostErrorKind::ValueRequired => Self::ValueRequired,
            HostErrorKind::Validation => Self::ValidationError,
            HostErrorKind::CharacterNotAllowed => Self::CharacterNotAllowed,
            HostErrorKind::Unknown => Self::Unknown,
        }
    }
}

impl std::fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_not_found_subset() {
        let in_set = [
            FaultCategory::InvalidResourceGroupName,
            FaultCategory::InvalidAccountName,
            FaultCategory::AzureResourceNotFound,
            FaultCategory::StorageAccountNotFound,
            FaultCategory::ResourceGroupNotFound,
        ];
        for category in in_set {
            assert!(category.is_resource_not_found(), "{category} not in set");
        }
        assert!(!FaultCategory::MissingRequiredParameters.is_resource_not_found());
        assert!(!FaultCategory::Unknown.is_resource_not_found());
    }

    #[test]
    fn test_serialized_name_matches_table_key() {
        let json = serde_json::to_string(&FaultCategory::InvalidJmesPathQuery).unwrap();
        assert_eq!(json, "\"InvalidJMESPathQuery\"");

        let parsed: FaultCategory = serde_json::from_str("\"UnrecognizedArguments\"").unwrap();
        assert_eq!(parsed, FaultCategory::UnrecognizedArguments);
    }

    #[test]
    fn test_from_host_kind() {
        assert_eq!(
            FaultCategory::from_host_kind(HostErrorKind::CommandNotFound),
            FaultCategory::CommandNotFound
        );
        assert_eq!(
            FaultCategory::from_host_kind(HostErrorKind::Unknown),
            FaultCategory::Unknown
        );
    }
}
