//! Remote suggestion service client.
//!
//! One variant of the recovery design fetches suggestion templates from a
//! hosted service instead of the local static table. The client makes a
//! single blocking `GET` with a strict connect timeout and no read timeout;
//! any failure is caught by the caller and degrades to "no remote
//! suggestions" rather than propagating.

mod context;
mod error;
mod service;

pub use context::RequestContext;
pub use error::{RemoteError, Result};
pub use service::{CLIENT_TYPE, DEFAULT_ENDPOINT, SuggestionService};
