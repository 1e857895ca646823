//! The suggestion service client.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use cli_recovery_core::SuggestionTemplate;

use crate::context::RequestContext;
use crate::error::{RemoteError, Result};

/// Default suggestions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://app.aladdin.microsoft.com/api/v1.0/suggestions";

/// Client identifier sent with every request.
pub const CLIENT_TYPE: &str = "AzureCli";

/// Connect timeout for the single outbound call. There is deliberately no
/// read timeout; a connected service is allowed to take its time.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct Query<'a> {
    command: &'a str,
    parameters: &'a str,
}

/// Blocking client for the remote suggestion service.
///
/// # Examples
///
/// ```no_run
/// use cli_recovery_remote::{RequestContext, SuggestionService};
///
/// let service = SuggestionService::new(None).unwrap();
/// let context = RequestContext::anonymous("2.11.1");
/// match service.fetch("storage account create", "--name,--resource-group", &context, "0.1.0") {
///     Ok(templates) => println!("{} remote suggestions", templates.len()),
///     Err(err) => println!("degrading to local table: {err}"),
/// }
/// ```
pub struct SuggestionService {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl SuggestionService {
    /// Creates a client for `endpoint`, defaulting to [`DEFAULT_ENDPOINT`].
    pub fn new(endpoint: Option<&str>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            client,
        })
    }

    /// Fetches suggestion templates for a failed command.
    ///
    /// `parameters` is the comma-delimited normalized parameter list. The
    /// response must be a `200` with a JSON array of suggestion objects;
    /// anything else is an error for the caller to log and absorb.
    pub fn fetch(
        &self,
        command: &str,
        parameters: &str,
        context: &RequestContext,
        extension_version: &str,
    ) -> Result<Vec<SuggestionTemplate>> {
        debug!(command, parameters, "querying remote suggestion service");

        let query = serde_json::to_string(&Query {
            command,
            parameters,
        })?;
        let context_json = serde_json::to_string(context)?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", query.as_str()),
                ("clientType", CLIENT_TYPE),
                ("context", context_json.as_str()),
                ("extensionVersion", extension_version),
            ])
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RemoteError::Status(status));
        }

        // Parse items individually so one malformed entry does not discard
        // the rest of the batch.
        let body: Vec<serde_json::Value> = response.json()?;
        let count = body.len();
        let templates: Vec<SuggestionTemplate> = body
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(template) => Some(template),
                Err(err) => {
                    debug!(%err, "dropping malformed remote suggestion");
                    None
                }
            })
            .collect();

        debug!(
            valid = templates.len(),
            total = count,
            "parsed remote suggestions"
        );
        Ok(templates)
    }
}
