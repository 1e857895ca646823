//! Static data tables for CLI failure recovery.
//!
//! Two read-only tables back the recovery pipeline:
//!
//! - [`HelpIndex`] — per-command parameter metadata plus a documentation
//!   table of contents flattened into a command → URL lookup.
//! - [`SuggestionTable`] — the fault-category → command → template mapping
//!   the suggestion lookup draws from.
//!
//! Both ship with embedded defaults (`load_default`) and accept path
//! overrides (`load`). A missing file surfaces as the typed
//! [`DataError::NotFound`] so the caller can log it and continue with
//! reduced output rather than failing the invocation.

mod error;
mod help;
mod model;

pub use error::{DataError, Result};
pub use help::{HelpEntry, HelpIndex, ParameterHelp};
pub use model::SuggestionTable;
