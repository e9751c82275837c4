//! Environment configuration, read once at process start.

use std::path::PathBuf;

use crate::error::{HeraldError, Result};

const DEFAULT_DOWNLOAD_DIR: &str = "./downloads";

/// Connection settings for the remote agent service.
///
/// Required values fail fast with [`HeraldError::Configuration`]; optional
/// connection ids only disable the tools that need them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the agent service.
    pub endpoint: String,
    /// Bearer credential for the service.
    pub api_key: String,
    /// Model deployment used when creating agents.
    pub model: String,
    /// Connection id for the hosted search tool.
    pub search_connection_id: Option<String>,
    /// Connection id for the web-grounding tool.
    pub grounding_connection_id: Option<String>,
    /// Directory where generated image files are persisted.
    pub download_dir: PathBuf,
}

impl Config {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    HeraldError::Configuration(format!(
                        "Please set the {key} environment variable."
                    ))
                })
        };

        let search_connection_id = lookup("HERALD_SEARCH_CONNECTION_ID").filter(|v| !v.is_empty());
        if search_connection_id.is_none() {
            tracing::warn!("HERALD_SEARCH_CONNECTION_ID is not set; search prompts will not work");
        }
        let grounding_connection_id =
            lookup("HERALD_GROUNDING_CONNECTION_ID").filter(|v| !v.is_empty());

        Ok(Self {
            endpoint: required("HERALD_ENDPOINT")?,
            api_key: required("HERALD_API_KEY")?,
            model: required("HERALD_MODEL")?,
            search_connection_id,
            grounding_connection_id,
            download_dir: lookup("HERALD_DOWNLOAD_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
        })
    }
}
