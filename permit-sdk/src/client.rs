//! Permit API client

use crate::config::{PermitConfig, DEFAULT_API_BASE, DEFAULT_PROJECT_ID};
use crate::error::PermitError;
use crate::permissions::effective_permissions;
use crate::types::{
    ApiResponse, Environment, PaginatedResponse, Resource, Role, RoleAssignment, User,
    UserPermissions,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

// ============================================================================
// Options
// ============================================================================

/// Options for listing users
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListOptions {
    /// Page number (1-based)
    pub page: Option<u32>,

    /// Number of users per page
    pub per_page: Option<u32>,

    /// Free-text filter on key, email and name
    pub search: Option<String>,
}

impl UserListOptions {
    /// Render the query string, without the leading `?`.
    ///
    /// Parameters appear in the order `page`, `per_page`, `search`. Zero
    /// numbers and empty search strings are left out.
    pub fn query_string(&self) -> Option<String> {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        let mut any = false;

        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.append_pair("page", &page.to_string());
            any = true;
        }
        if let Some(per_page) = self.per_page.filter(|p| *p > 0) {
            query.append_pair("per_page", &per_page.to_string());
            any = true;
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("search", search);
            any = true;
        }

        any.then(|| query.finish())
    }
}

// ============================================================================
// Client
// ============================================================================

/// Read-only Permit API client
#[derive(Clone)]
pub struct Permit {
    client: reqwest::Client,
    api_base: Url,
    project_id: String,
    default_env_id: Option<String>,
    headers: HeaderMap,
}

impl std::fmt::Debug for Permit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Permit")
            .field("api_base", &self.api_base.as_str())
            .field("project_id", &self.project_id)
            .field("default_env_id", &self.default_env_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Permit {
    /// Create a client from a prepared configuration
    pub fn new(config: &PermitConfig) -> Result<Self, PermitError> {
        Self::build(config, None)
    }

    /// Create a builder for more advanced configuration
    pub fn builder() -> PermitBuilder {
        PermitBuilder::new()
    }

    /// Project every request is scoped to
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Environment used when a call does not name one
    pub fn default_env_id(&self) -> Option<&str> {
        self.default_env_id.as_deref()
    }

    fn build(config: &PermitConfig, timeout: Option<Duration>) -> Result<Self, PermitError> {
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            PermitError::Configuration(format!("Invalid API base '{}': {}", config.api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(PermitError::Configuration(format!(
                "Invalid API base '{}'",
                config.api_base
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            PermitError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Permit {
            client,
            api_base,
            project_id: config.project_id.clone(),
            default_env_id: config.default_env_id.clone(),
            headers: build_headers(&config.api_key)?,
        })
    }

    /// Pick the explicit environment id, else the configured default.
    ///
    /// An explicit empty id counts as missing and does not fall back.
    fn env_id<'a>(&'a self, env_id: Option<&'a str>) -> Result<&'a str, PermitError> {
        env_id
            .or(self.default_env_id.as_deref())
            .filter(|id| !id.is_empty())
            .ok_or_else(PermitError::missing_environment)
    }

    /// Build an endpoint URL from path segments (each segment is percent-encoded)
    fn url(&self, segments: &[&str], query: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.set_query(query);
        url
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>, PermitError> {
        tracing::debug!(path = url.path(), query = url.query(), "GET");

        let response = self
            .client
            .get(url.clone())
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(PermitError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                PermitError::Transport(format!(
                    "Failed to read error response ({}): {}",
                    status, e
                ))
            })?;
            tracing::warn!(path = url.path(), status = status.as_u16(), "Permit API error");
            return Err(PermitError::api(status, body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(PermitError::from_reqwest_error)?;
        serde_json::from_slice(&bytes)
            .and_then(ApiResponse::from_value)
            .map_err(|e| PermitError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    // ------------------------------------------------------------------------
    // Environments
    // ------------------------------------------------------------------------

    /// List all environments in the project
    pub async fn list_environments(
        &self,
    ) -> Result<ApiResponse<Vec<Environment>>, PermitError> {
        let url = self.url(&["v2", "projects", self.project_id.as_str(), "envs"], None);
        self.get(url).await
    }

    /// Get one environment by id or key
    pub async fn get_environment(
        &self,
        env_id: &str,
    ) -> Result<ApiResponse<Environment>, PermitError> {
        let url = self.url(&["v2", "projects", self.project_id.as_str(), "envs", env_id], None);
        self.get(url).await
    }

    // ------------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------------

    /// List the roles defined in an environment
    pub async fn list_roles(
        &self,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<Vec<Role>>, PermitError> {
        let env = self.env_id(env_id)?;
        let url = self.url(&["v2", "schema", self.project_id.as_str(), env, "roles"], None);
        self.get(url).await
    }

    /// Get one role with its permissions, extended roles and grant rules
    pub async fn get_role(
        &self,
        role_key: &str,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<Role>, PermitError> {
        let env = self.env_id(env_id)?;
        let url = self.url(
            &["v2", "schema", self.project_id.as_str(), env, "roles", role_key],
            None,
        );
        self.get(url).await
    }

    /// List the resources defined in an environment
    pub async fn list_resources(
        &self,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<Vec<Resource>>, PermitError> {
        let env = self.env_id(env_id)?;
        let url = self.url(&["v2", "schema", self.project_id.as_str(), env, "resources"], None);
        self.get(url).await
    }

    /// Get one resource with its actions, attributes, roles and relations
    pub async fn get_resource(
        &self,
        resource_key: &str,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<Resource>, PermitError> {
        let env = self.env_id(env_id)?;
        let url = self.url(
            &["v2", "schema", self.project_id.as_str(), env, "resources", resource_key],
            None,
        );
        self.get(url).await
    }

    // ------------------------------------------------------------------------
    // Facts
    // ------------------------------------------------------------------------

    /// List users, optionally paginated and filtered
    pub async fn list_users(
        &self,
        options: &UserListOptions,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<PaginatedResponse<User>>, PermitError> {
        let env = self.env_id(env_id)?;
        let query = options.query_string();
        let url = self.url(
            &["v2", "facts", self.project_id.as_str(), env, "users"],
            query.as_deref(),
        );
        self.get(url).await
    }

    /// Get one user by key or id
    pub async fn get_user(
        &self,
        user_key: &str,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<User>, PermitError> {
        let env = self.env_id(env_id)?;
        let url = self.url(
            &["v2", "facts", self.project_id.as_str(), env, "users", user_key],
            None,
        );
        self.get(url).await
    }

    /// List the role assignments held by a user across tenants
    pub async fn get_user_role_assignments(
        &self,
        user_key: &str,
        env_id: Option<&str>,
    ) -> Result<ApiResponse<Vec<RoleAssignment>>, PermitError> {
        let env = self.env_id(env_id)?;
        let url = self.url(
            &["v2", "facts", self.project_id.as_str(), env, "users", user_key, "roles"],
            None,
        );
        self.get(url).await
    }

    /// Compute a user's effective permissions.
    ///
    /// Fetches the user, their role assignments and the environment's roles
    /// concurrently; the first failure fails the whole call.
    pub async fn get_user_permissions(
        &self,
        user_key: &str,
        env_id: Option<&str>,
    ) -> Result<UserPermissions, PermitError> {
        let env = self.env_id(env_id)?;

        let (user, role_assignments, roles) = tokio::try_join!(
            self.get_user(user_key, Some(env)),
            self.get_user_role_assignments(user_key, Some(env)),
            self.list_roles(Some(env)),
        )?;

        let permissions = effective_permissions(&role_assignments, &roles);

        Ok(UserPermissions {
            user,
            role_assignments,
            permissions,
        })
    }
}

/// Builder for [`Permit`] clients
///
/// Create with [`Permit::builder()`]. The `api_key` is required.
pub struct PermitBuilder {
    api_key: Option<String>,
    project_id: Option<String>,
    default_env_id: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
}

impl PermitBuilder {
    fn new() -> Self {
        Self {
            api_key: None,
            project_id: None,
            default_env_id: None,
            api_base: None,
            timeout: None,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the project id (default: `"default"`)
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the environment used when a call omits one
    pub fn default_env_id(mut self, env_id: impl Into<String>) -> Self {
        self.default_env_id = Some(env_id.into());
        self
    }

    /// Set a custom API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set a request timeout (default: none)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Permit, PermitError> {
        let api_key = self
            .api_key
            .ok_or_else(|| PermitError::Configuration("API key is required".to_string()))?;

        let config = PermitConfig {
            api_key,
            project_id: self
                .project_id
                .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string()),
            default_env_id: self.default_env_id,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        };

        Permit::build(&config, self.timeout)
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap, PermitError> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|e| PermitError::Configuration(format!("Invalid API key: {}", e)))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
