//! Client configuration

use thiserror::Error;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.permit.io";

/// Project used when `PERMIT_PROJECT_ID` is not set
pub const DEFAULT_PROJECT_ID: &str = "default";

pub const API_KEY_VAR: &str = "PERMIT_API_KEY";
pub const PROJECT_ID_VAR: &str = "PERMIT_PROJECT_ID";
pub const ENV_ID_VAR: &str = "PERMIT_ENV_ID";
pub const API_URL_VAR: &str = "PERMIT_API_URL";

/// Errors raised while assembling a [`PermitConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Immutable settings shared by every request a client makes.
///
/// Built once at startup and handed to [`crate::Permit::new`].
#[derive(Clone, PartialEq, Eq)]
pub struct PermitConfig {
    pub api_key: String,
    pub project_id: String,
    pub default_env_id: Option<String>,
    pub api_base: String,
}

impl std::fmt::Debug for PermitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermitConfig")
            .field("api_key", &"[REDACTED]")
            .field("project_id", &self.project_id)
            .field("default_env_id", &self.default_env_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl PermitConfig {
    /// Config with the given key and every other field at its default
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            default_env_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let api_key = var(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        Ok(Self {
            api_key,
            project_id: var(PROJECT_ID_VAR).unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string()),
            default_env_id: var(ENV_ID_VAR),
            api_base: var(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}
