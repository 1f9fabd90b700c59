//! Minimal read-only client for the Permit.io management API
//!
//! Covers the environment, schema (roles, resources) and facts (users, role
//! assignments) endpoints, plus an effective-permissions view that joins a
//! user's role assignments against the environment's role definitions.
//!
//! # Quick Start
//!
//! ```no_run
//! // Requires PERMIT_API_KEY environment variable
//! use permit_sdk::{Permit, PermitConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PermitConfig::from_env()?;
//! let client = Permit::new(&config)?;
//!
//! for env in client.list_environments().await?.iter() {
//!     println!("{}", env.key);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Effective Permissions
//!
//! ```no_run
//! use permit_sdk::Permit;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Permit::builder()
//!     .api_key("permit_key_...")
//!     .project_id("acme")
//!     .default_env_id("production")
//!     .build()?;
//!
//! let result = client.get_user_permissions("alice", None).await?;
//! for entry in &result.permissions {
//!     println!("{} in {}: {:?}", entry.role, entry.tenant, entry.permissions);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod permissions;
pub mod types;

pub use client::{Permit, PermitBuilder, UserListOptions};
pub use config::{
    ConfigError, PermitConfig, API_KEY_VAR, API_URL_VAR, DEFAULT_API_BASE, DEFAULT_PROJECT_ID,
    ENV_ID_VAR, PROJECT_ID_VAR,
};
pub use error::PermitError;
pub use permissions::effective_permissions;
pub use types::{
    ApiResponse, AssociatedTenant, EffectivePermission, Environment, GrantedTo, PaginatedResponse,
    Resource, ResourceAction, ResourceAttribute, ResourceRole, Role, RoleAssignment, User,
    UserPermissions, UserRole, UserWithRole,
};
