//! Authentication module
//!
//! Profile-declared credentials applied to each outgoing request.
//! Supported schemes: none, bearer token, API key (header or query),
//! HTTP basic.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};
