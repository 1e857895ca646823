//! Ordered first-match fault classification.
//!
//! Maps a free-text failure message to exactly one [`FaultCategory`] via an
//! ordered chain of substring tests. Order is load-bearing: categories
//! overlap in vocabulary ("not found" is a superstring test that must run
//! after the more specific resource checks nested inside it), so the branch
//! sequence below is preserved exactly and deliberately not "improved".

use tracing::debug;

use cli_recovery_core::{CapturedError, FaultCategory};

/// Classifies a failure message into exactly one category.
///
/// Total function: never panics, and any message matching no rule yields
/// [`FaultCategory::Unknown`]. The message is case-folded and trimmed before
/// matching.
///
/// # Examples
///
/// ```
/// use cli_recovery_core::FaultCategory;
/// use cli_recovery_engine::classify;
///
/// assert_eq!(
///     classify("unrecognized arguments: --bogus"),
///     FaultCategory::UnrecognizedArguments
/// );
/// assert_eq!(
///     classify("resource group 'rg1' not found"),
///     FaultCategory::ResourceGroupNotFound
/// );
/// assert_eq!(classify("something else entirely"), FaultCategory::Unknown);
/// ```
pub fn classify(error_message: &str) -> FaultCategory {
    let message = error_message.trim().to_lowercase();

    if message.is_empty() {
        debug!("error message was empty; unable to classify");
        return FaultCategory::Unknown;
    }
    debug!(%message, "classifying error message");

    let category = if message.contains("unrecognized") {
        FaultCategory::UnrecognizedArguments
    } else if message.contains("expected one argument")
        || message.contains("expected at least one argument")
        || message.contains("value required")
    {
        FaultCategory::ExpectedArgument
    } else if message.contains("command not found") || message.contains("command group") {
        FaultCategory::UnknownSubcommand
    } else if message.contains("arguments are required") || message.contains("argument required") {
        if message.contains("_subcommand") {
            FaultCategory::MissingRequiredSubcommand
        } else if message.contains("_command_package") {
            FaultCategory::UnableToParseCommandInput
        } else {
            FaultCategory::MissingRequiredParameters
        }
    } else if message.contains("not found")
        || message.contains("could not be found")
        || message.contains("resource not found")
    {
        if message.contains("storage_account") || message.contains("storage account") {
            FaultCategory::StorageAccountNotFound
        } else if message.contains("resource_group") || message.contains("resource group") {
            FaultCategory::ResourceGroupNotFound
        } else {
            FaultCategory::AzureResourceNotFound
        }
    } else if message.contains("pattern")
        || message.contains("is not a valid value")
        || message.contains("invalid")
    {
        if message.contains("jmespath_type") {
            FaultCategory::InvalidJmesPathQuery
        } else if message.contains("datetime_type") {
            FaultCategory::InvalidDateTimeArgumentValue
        } else if message.contains("--output") {
            FaultCategory::InvalidOutputType
        } else if message.contains("resource_group") {
            FaultCategory::InvalidResourceGroupName
        } else if message.contains("storage_account") {
            FaultCategory::InvalidAccountName
        } else {
            FaultCategory::InvalidParameterValue
        }
    } else if message.contains("validation error") {
        FaultCategory::ValidationError
    } else if message.contains("character not allowed") {
        FaultCategory::CharacterNotAllowed
    } else {
        FaultCategory::Unknown
    };

    if category != FaultCategory::Unknown {
        debug!(%category, "classified error");
    } else {
        debug!("unknown error type; this may impact suggestion quality");
    }

    category
}

/// Classifies the captured error, if any.
///
/// Falls back to the structured host error kind only when no message text
/// was captured; absence of both yields [`FaultCategory::Unknown`].
pub fn classify_captured(error: Option<&CapturedError>) -> FaultCategory {
    match error {
        None => {
            debug!("no error was captured; unable to classify");
            FaultCategory::Unknown
        }
        Some(error) if error.message.trim().is_empty() => {
            FaultCategory::from_host_kind(error.kind)
        }
        Some(error) => classify(&error.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cli_recovery_core::HostErrorKind;

    #[test]
    fn test_order_sensitive_resource_group_before_generic() {
        assert_eq!(
            classify("resource group 'rg1' not found"),
            FaultCategory::ResourceGroupNotFound
        );
        assert_eq!(
            classify("the storage account 'acct' could not be found"),
            FaultCategory::StorageAccountNotFound
        );
        assert_eq!(
            classify("the resource 'x' was not found"),
            FaultCategory::AzureResourceNotFound
        );
    }

    #[test]
    fn test_missing_required_parameters() {
        assert_eq!(
            classify("the following arguments are required: --resource-group/-g, --vm-name, --nic"),
            FaultCategory::MissingRequiredParameters
        );
        assert_eq!(
            classify("the following arguments are required: _subcommand"),
            FaultCategory::MissingRequiredSubcommand
        );
        assert_eq!(
            classify("the following arguments are required: _command_package"),
            FaultCategory::UnableToParseCommandInput
        );
    }

    #[test]
    fn test_invalid_value_family() {
        assert_eq!(
            classify("'tablee' is not a valid value for '--output'"),
            FaultCategory::InvalidOutputType
        );
        assert_eq!(
            classify("invalid jmespath_type value"),
            FaultCategory::InvalidJmesPathQuery
        );
        assert_eq!(
            classify("invalid datetime_type value"),
            FaultCategory::InvalidDateTimeArgumentValue
        );
        assert_eq!(
            classify("parameter 'resource_group_name' must conform to the following pattern"),
            FaultCategory::InvalidResourceGroupName
        );
        assert_eq!(
            classify("the value provided is invalid"),
            FaultCategory::InvalidParameterValue
        );
    }

    #[test]
    fn test_unrecognized_wins_over_later_branches() {
        // "unrecognized" is checked first even when "invalid" also appears.
        assert_eq!(
            classify("unrecognized arguments: --invalid"),
            FaultCategory::UnrecognizedArguments
        );
    }

    #[test]
    fn test_expected_argument() {
        assert_eq!(
            classify("argument --name: expected one argument"),
            FaultCategory::ExpectedArgument
        );
        assert_eq!(classify("value required for --sku"), FaultCategory::ExpectedArgument);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert_eq!(
            classify("'frobnicate' is not in the 'az storage' command group"),
            FaultCategory::UnknownSubcommand
        );
    }

    #[test]
    fn test_validation_and_character_branches() {
        assert_eq!(classify("operation returned a validation error"), FaultCategory::ValidationError);
        assert_eq!(
            classify("character not allowed in account name"),
            FaultCategory::CharacterNotAllowed
        );
    }

    #[test]
    fn test_total_on_arbitrary_input() {
        assert_eq!(classify(""), FaultCategory::Unknown);
        assert_eq!(classify("    "), FaultCategory::Unknown);
        assert_eq!(classify("no rule matches this"), FaultCategory::Unknown);
    }

    #[test]
    fn test_captured_fallback_to_host_kind() {
        let error = CapturedError {
            message: String::new(),
            kind: HostErrorKind::CommandNotFound,
            suggested_fix: None,
        };
        assert_eq!(classify_captured(Some(&error)), FaultCategory::CommandNotFound);
        assert_eq!(classify_captured(None), FaultCategory::Unknown);
    }
}
