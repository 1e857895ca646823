//! The host command-table collaborator.

use cli_recovery_db::HelpIndex;

/// Read access to the host CLI's command and command-group tables.
///
/// The tokenizer and orchestrator consume this seam instead of reaching into
/// host internals; any source of command metadata can implement it. The
/// default implementation is backed by the static [`HelpIndex`].
pub trait CommandRegistry {
    /// Returns `true` if `command` is a known command or command group.
    fn is_command(&self, command: &str) -> bool;

    /// Returns `true` if `group` is a known command-group prefix.
    fn is_command_group(&self, group: &str) -> bool;

    /// Expands `parameter` to its canonical long form on `command`.
    ///
    /// Returns `None` for flags the command does not declare.
    fn normalize_parameter(&self, command: &str, parameter: &str) -> Option<String>;

    /// Returns `true` if any known command starts with `prefix`.
    fn has_command_with_prefix(&self, prefix: &str) -> bool;
}

impl CommandRegistry for HelpIndex {
    fn is_command(&self, command: &str) -> bool {
        self.contains(command)
    }

    fn is_command_group(&self, group: &str) -> bool {
        HelpIndex::is_command_group(self, group)
    }

    fn normalize_parameter(&self, command: &str, parameter: &str) -> Option<String> {
        HelpIndex::normalize_parameter(self, command, parameter)
    }

    fn has_command_with_prefix(&self, prefix: &str) -> bool {
        self.commands().any(|command| command.starts_with(prefix))
    }
}

/// A registry that knows nothing.
///
/// Used when no help data could be loaded; every lookup misses and flags are
/// retained as typed.
#[derive(Debug, Default)]
pub struct EmptyRegistry;

impl CommandRegistry for EmptyRegistry {
    fn is_command(&self, _command: &str) -> bool {
        false
    }

    fn is_command_group(&self, _group: &str) -> bool {
        false
    }

    fn normalize_parameter(&self, _command: &str, _parameter: &str) -> Option<String> {
        None
    }

    fn has_command_with_prefix(&self, _prefix: &str) -> bool {
        false
    }
}
