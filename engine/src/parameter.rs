//! Global parameter knowledge shared across commands.

/// Parameters accepted by every host command.
///
/// These are never borrowed into a suggestion from the failing invocation;
/// carrying a `--debug` or `--output` over says nothing about the corrected
/// command.
pub const GLOBAL_PARAMETERS: &[&str] = &[
    "--debug",
    "--help",
    "--only-show-errors",
    "--output",
    "--query",
    "--subscription",
    "--verbose",
];

/// Returns `true` if `flag` is a global host parameter.
pub fn is_global_parameter(flag: &str) -> bool {
    GLOBAL_PARAMETERS.contains(&flag)
}

/// Preferred alternative for a parameter within a command group.
///
/// Within the `group` command group, resource-group-valued flags are spelled
/// `--name`.
pub fn preferred_parameter(command_group: &str, parameter: &str) -> Option<&'static str> {
    match (command_group, parameter) {
        ("group", "--resource-group") => Some("--name"),
        _ => None,
    }
}
