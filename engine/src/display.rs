//! Render-time formatting of the suggestion output.
//!
//! Suggestions stay plain value objects until this point; styling is a pure
//! formatting pass applied once, here. Color output is routed through
//! [`colored`], which the binary enables only for interactive terminals.

use colored::Colorize;

use cli_recovery_core::{HOST_PROGRAM, Link, OPTIONAL_MARKER, Suggestion};

/// Enables or disables ANSI styling for all rendered output.
pub fn set_styling_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Formats the "TRY" block: one entry per suggestion, then the documentation
/// link and a read-more line. Returns `None` when there is nothing to show.
///
/// Suggestion order is preserved; sorting happened during personalization.
pub fn format_suggestions(suggestions: &[Suggestion], link: Option<&Link>) -> Option<String> {
    if suggestions.is_empty() {
        return None;
    }

    let mut buffer = vec![format!("\n{}", "TRY".bold())];

    for suggestion in suggestions {
        buffer.push(format!("{}\n", format_suggestion(suggestion)));
    }

    if let Some(link) = link {
        buffer.push(link.url.cyan().bold().underline().to_string());
        buffer.push(
            format!("Read more about {HOST_PROGRAM} {}", link.context)
                .bright_black()
                .bold()
                .to_string(),
        );
    }

    Some(buffer.join("\n"))
}

/// Formats one suggestion: styled command, `--param value` pairs with
/// optional parameters bracketed, then the description line.
fn format_suggestion(suggestion: &Suggestion) -> String {
    let mut line = format!("{HOST_PROGRAM} {}", suggestion.command())
        .blue()
        .bold()
        .to_string();

    if !suggestion.is_command_only() {
        for (parameter, argument) in suggestion.parameters().iter().zip(suggestion.arguments()) {
            let optional = argument.starts_with(OPTIONAL_MARKER);
            let argument = argument.trim_start_matches(OPTIONAL_MARKER);

            let pair = if argument.is_empty() {
                parameter.blue().to_string()
            } else {
                format!("{} {argument}", parameter.blue())
            };
            if pair.is_empty() {
                continue;
            }
            if optional {
                line.push_str(&format!(" [{pair}]"));
            } else {
                line.push_str(&format!(" {pair}"));
            }
        }
    }

    match suggestion.description() {
        Some(description) => format!("{line}\n{}", description.bright_black()),
        None => line,
    }
}

/// The fallback line shown when the command prefix is real but no suggestion
/// could be produced for it.
pub fn unable_to_help(command: &str) -> String {
    format!(
        "\nSorry I am not able to help with [{command}]\n\
         Try running [{HOST_PROGRAM} find \"{HOST_PROGRAM} {command}\"] to see examples of [{command}] from other users."
    )
}
