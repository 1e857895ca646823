//! Request context sent alongside remote suggestion queries.

use serde::Serialize;

/// Caller identity and version information attached to each request.
///
/// The correlation and subscription identifiers are only present when the
/// host's telemetry is enabled; either may be absent independently and is
/// then omitted from the serialized context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Correlation id of the failed host invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Subscription the host was operating against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Host program version.
    pub version_number: String,
}

impl RequestContext {
    /// Context with only the version populated, for telemetry-disabled runs.
    pub fn anonymous(version: &str) -> Self {
        Self {
            correlation_id: None,
            subscription_id: None,
            version_number: version.to_string(),
        }
    }
}
