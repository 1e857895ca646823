//! Structured corrections attached to a captured host error.

use serde::{Deserialize, Serialize};

/// What kind of correction the host proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionKind {
    /// A parameter value was invalid and a corrected value is known.
    InvalidArgument,
}

/// A corrected value the host derived from its own error analysis.
///
/// Consumed by the tokenizer when building the per-parameter correction
/// table: if the target parameter matches a typed parameter, the corrected
/// value replaces the typed one during personalization.
///
/// # Examples
///
/// ```
/// use cli_recovery_core::{CorrectionKind, SuggestedCorrection};
///
/// // Host error taxonomies name the value type, not the flag; known value
/// // types are translated to their parameter name.
/// let fix = SuggestedCorrection::new(
///     "my-valid-rg",
///     CorrectionKind::InvalidArgument,
///     Some("resource_group_name"),
/// );
/// assert_eq!(fix.target_parameter.as_deref(), Some("--resource-group"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedCorrection {
    /// The corrected value to substitute.
    pub suggested_value: String,
    /// The kind of correction.
    pub kind: CorrectionKind,
    /// Normalized parameter the correction applies to, if known.
    pub target_parameter: Option<String>,
}

impl SuggestedCorrection {
    /// Creates a correction, translating known host value-type names to
    /// parameter names.
    pub fn new(suggested_value: &str, kind: CorrectionKind, parameter: Option<&str>) -> Self {
        Self {
            suggested_value: suggested_value.to_string(),
            kind,
            target_parameter: parameter.map(|p| translate_value_type(p).to_string()),
        }
    }
}

fn translate_value_type(parameter: &str) -> &str {
    match parameter {
        "resource_group_name" => "--resource-group",
        other => other,
    }
}
