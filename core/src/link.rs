//! Documentation links paired with the command they describe.

use serde::{Deserialize, Serialize};

/// A documentation page for a command or command group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL of the documentation page.
    pub url: String,
    /// The command or command group the page documents.
    pub context: String,
}

impl Link {
    /// Creates a link.
    pub fn new(url: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            context: context.into(),
        }
    }
}
