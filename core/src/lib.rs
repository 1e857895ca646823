//! Core types for CLI failure recovery.
//!
//! This crate defines the data model shared by every stage of the recovery
//! pipeline:
//!
//! - [`FaultCategory`] — why the host command failed, derived from its error
//!   text.
//! - [`SuggestionTemplate`] — a raw, parameterized example of a corrected
//!   command as stored in the static suggestion table.
//! - [`Suggestion`] — a validated template instance whose parameters and
//!   placeholder values are kept in positional lockstep.
//! - [`CapturedError`] — the last error captured from the host, including an
//!   optional structured [`SuggestedCorrection`].
//! - [`Link`] — a documentation link paired with the command it describes.
//!
//! # Example
//!
//! ```
//! use cli_recovery_core::{Suggestion, SuggestionTemplate};
//!
//! let template = SuggestionTemplate {
//!     command: Some("storage account create".into()),
//!     parameters: Some("--name,--resource-group".into()),
//!     placeholders: Some("mystorageaccount♠MyResourceGroup".into()),
//!     description: None,
//! };
//!
//! let suggestion = Suggestion::parse(&template).unwrap();
//! assert_eq!(suggestion.parameters().len(), suggestion.arguments().len());
//! ```

mod capture;
mod correction;
mod error;
mod fault;
mod link;
mod suggestion;

pub use capture::{CapturedError, HostErrorKind, strip_ansi_codes};
pub use correction::{CorrectionKind, SuggestedCorrection};
pub use error::SuggestionError;
pub use fault::FaultCategory;
pub use link::Link;
pub use suggestion::{
    OPTIONAL_MARKER, PARAMETER_DELIMITER, PLACEHOLDER_DELIMITER, Suggestion, SuggestionTemplate,
};

/// Name of the host program whose failures this tool recovers from.
///
/// Used when rendering corrected invocations and "read more" lines.
pub const HOST_PROGRAM: &str = "az";
