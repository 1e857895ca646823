//! Failure classification and suggestion personalization for a host CLI.
//!
//! After the host CLI rejects an invocation, this crate turns the raw
//! argument list and the captured error into a short list of corrected
//! example invocations:
//!
//! 1. [`tokenizer`] splits the raw arguments into a command-group prefix,
//!    a command, and positionally matched (flag, value) pairs.
//! 2. [`classifier`] maps the free-text error message to one
//!    [`FaultCategory`] via ordered substring rules.
//! 3. [`model`] looks up suggestion templates for the (category, command)
//!    pair, with a rule-based short-circuit and a command-group fallback.
//! 4. [`personalize`] rewrites each suggestion with the user's actual
//!    values, ranks, and help metadata.
//! 5. [`display`] renders the final "TRY" block.
//!
//! [`Orchestrator`] wires the stages together once per failed invocation.
//!
//! # Example
//!
//! ```
//! use cli_recovery_core::CapturedError;
//! use cli_recovery_db::{HelpIndex, SuggestionTable};
//! use cli_recovery_engine::{FailureRecoveryModel, Orchestrator};
//!
//! let help = HelpIndex::load_default().unwrap();
//! let model = FailureRecoveryModel::new(SuggestionTable::load_default().unwrap());
//! let orchestrator = Orchestrator::new(&help, Some(&help), model);
//!
//! let args: Vec<String> = ["group", "create"].iter().map(|s| s.to_string()).collect();
//! let error = CapturedError::from_message(
//!     "the following arguments are required: --name/-n/--resource-group/-g",
//! );
//!
//! let output = orchestrator.execute(&args, Some(&error));
//! assert!(output.unwrap().contains("az group create"));
//! ```
//!
//! [`FaultCategory`]: cli_recovery_core::FaultCategory

pub mod classifier;
pub mod display;
pub mod model;
mod orchestrator;
pub mod parameter;
pub mod personalize;
pub mod registry;
pub mod rules;
pub mod tokenizer;

pub use classifier::{classify, classify_captured};
pub use model::{FailureRecoveryModel, parse_templates};
pub use orchestrator::Orchestrator;
pub use personalize::personalize;
pub use registry::{CommandRegistry, EmptyRegistry};
pub use rules::RuleBasedModel;
pub use tokenizer::{ParseTableEntry, ParsedCommand};
