use std::env;

use serde::Deserialize;
use url::Url;

use crate::error::TablebaseError;

const DEFAULT_ENDPOINT: &str = "https://syzygy-tables.info/api";

/// Settings for the HTTP lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Lookup endpoint. The position is sent as the `fen` query parameter.
    pub endpoint: Url,
    pub user_agent: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ExplorerConfig {
    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TablebaseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `TABLEBASE_ENDPOINT` and `TABLEBASE_USER_AGENT`.
    pub fn from_env() -> Result<Self, TablebaseError> {
        let mut config = Self::default();
        if let Ok(endpoint) = env::var("TABLEBASE_ENDPOINT") {
            config.endpoint = Url::parse(&endpoint)?;
        }
        if let Ok(user_agent) = env::var("TABLEBASE_USER_AGENT") {
            config.user_agent = user_agent;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keeps_defaults() {
        let config = ExplorerConfig::from_json(r#"{"endpoint": "http://localhost:5000/api"}"#).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://localhost:5000/api");
        assert_eq!(config.user_agent, ExplorerConfig::default().user_agent);
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(matches!(
            ExplorerConfig::from_json(r#"{"endpoint": "not a url"}"#),
            Err(TablebaseError::Json(_))
        ));
    }
}
