//! Tool argument types.
//!
//! Field names are camelCase on the wire. Optional fields may be omitted;
//! anything that does not deserialize is rejected before the API is called.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetEnvironmentParams {
    /// The environment ID or key to retrieve
    pub env_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentParams {
    /// Environment ID (uses the configured default if not provided)
    #[serde(default)]
    pub env_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetRoleParams {
    /// The role key to retrieve
    pub role_key: String,

    /// Environment ID (uses the configured default if not provided)
    #[serde(default)]
    pub env_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetResourceParams {
    /// The resource key to retrieve
    pub resource_key: String,

    /// Environment ID (uses the configured default if not provided)
    #[serde(default)]
    pub env_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    /// Environment ID (uses the configured default if not provided)
    #[serde(default)]
    pub env_id: Option<String>,

    /// Page number for pagination
    #[serde(default)]
    pub page: Option<u32>,

    /// Number of results per page
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Search query to filter users
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    /// The user key or ID
    pub user_key: String,

    /// Environment ID (uses the configured default if not provided)
    #[serde(default)]
    pub env_id: Option<String>,
}
