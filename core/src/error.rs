//! Error types for suggestion parsing and validation.

use thiserror::Error;

/// Errors raised while turning a raw template into a [`Suggestion`].
///
/// The two variants are deliberately distinct failure kinds: a missing field
/// is a *parse* failure of the raw table entry, while a placeholder overflow
/// is a structural *invalid-suggestion* failure of an otherwise well-formed
/// entry. Callers drop the offending entry in either case and keep the rest
/// of the batch.
///
/// [`Suggestion`]: crate::Suggestion
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// A required template field was absent.
    #[error("missing required suggestion field '{0}'")]
    MissingField(&'static str),

    /// The template declared more placeholders than parameters.
    #[error("got more placeholders ({placeholders}) than parameters ({parameters})")]
    PlaceholderOverflow {
        /// Number of parameters declared.
        parameters: usize,
        /// Number of placeholder values declared.
        placeholders: usize,
    },
}
