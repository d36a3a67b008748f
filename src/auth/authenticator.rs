//! Request authentication

use super::types::{AuthConfig, Location};
use reqwest::RequestBuilder;

/// Applies an [`AuthConfig`] to outgoing requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create an authenticator from a config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Bearer { token } => req.bearer_auth(token),
            AuthConfig::Basic { username, password } => {
                req.basic_auth(username, Some(password))
            }
            AuthConfig::ApiKey {
                location,
                name,
                prefix,
                value,
            } => {
                let rendered = match prefix {
                    Some(p) => format!("{p}{value}"),
                    None => value.clone(),
                };
                match location {
                    Location::Header => req.header(name.as_str(), rendered),
                    Location::Query => req.query(&[(name.as_str(), rendered.as_str())]),
                }
            }
        }
    }
}
