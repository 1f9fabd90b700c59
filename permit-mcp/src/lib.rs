//! MCP server exposing the Permit.io management API as tools.
//!
//! The server speaks MCP over stdio and forwards each tool call to one
//! [`permit_sdk::Permit`] operation, wrapping the outcome in a text envelope.
//!
//! # Tools
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `list-environments` | |
//! | `get-environment` | `envId` |
//! | `list-roles` | `envId?` |
//! | `get-role` | `roleKey`, `envId?` |
//! | `list-resources` | `envId?` |
//! | `get-resource` | `resourceKey`, `envId?` |
//! | `list-users` | `envId?`, `page?`, `perPage?`, `search?` |
//! | `get-user` | `userKey`, `envId?` |
//! | `get-user-permissions` | `userKey`, `envId?` |
//!
//! # Example
//!
//! ```rust,no_run
//! use permit_mcp::PermitServer;
//! use permit_sdk::{Permit, PermitConfig};
//! use rmcp::{transport::stdio, ServiceExt};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Permit::new(&PermitConfig::from_env()?)?;
//! let service = PermitServer::new(client).serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod logging;
pub mod params;
pub mod response;
pub mod server;

pub use logging::init_tracing;
pub use response::{error_result, into_call_result};
pub use server::{PermitServer, SERVER_NAME};
