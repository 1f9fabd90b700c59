//! MCP tool registry for the Permit API.

use permit_sdk::{Permit, UserListOptions};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};

use crate::params::{
    EnvironmentParams, GetEnvironmentParams, GetResourceParams, GetRoleParams, ListUsersParams,
    UserParams,
};
use crate::response::into_call_result;

/// Name reported to clients during initialization
pub const SERVER_NAME: &str = "permit-mcp";

const INSTRUCTIONS: &str = "Read-only access to a Permit.io project: list environments, \
inspect roles and resources, look up users, and compute a user's effective permissions. \
Tools that take envId fall back to the server's default environment when it is omitted.";

/// MCP server that forwards each tool call to one [`Permit`] operation.
///
/// Arguments are validated against the tool's schema before the API is
/// called. API failures come back as error envelopes rather than protocol
/// errors, so one failed call never ends the session.
#[derive(Clone)]
pub struct PermitServer {
    client: Permit,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PermitServer {
    pub fn new(client: Permit) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "list-environments",
        description = "List all environments in the Permit.io project, with their keys, names and configuration."
    )]
    async fn list_environments(&self) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "list-environments", "tool call");
        Ok(into_call_result(self.client.list_environments().await))
    }

    #[tool(
        name = "get-environment",
        description = "Get one environment by ID or key, including its settings and JWKS."
    )]
    async fn get_environment(
        &self,
        Parameters(params): Parameters<GetEnvironmentParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "get-environment", env = %params.env_id, "tool call");
        Ok(into_call_result(
            self.client.get_environment(&params.env_id).await,
        ))
    }

    #[tool(
        name = "list-roles",
        description = "List the roles defined in an environment, with their permissions."
    )]
    async fn list_roles(
        &self,
        Parameters(params): Parameters<EnvironmentParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "list-roles", "tool call");
        Ok(into_call_result(
            self.client.list_roles(params.env_id.as_deref()).await,
        ))
    }

    #[tool(
        name = "get-role",
        description = "Get one role, including all of its permissions, the roles it extends and its grant rules."
    )]
    async fn get_role(
        &self,
        Parameters(params): Parameters<GetRoleParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "get-role", role = %params.role_key, "tool call");
        Ok(into_call_result(
            self.client
                .get_role(&params.role_key, params.env_id.as_deref())
                .await,
        ))
    }

    #[tool(
        name = "list-resources",
        description = "List the resources defined in an environment. Resources are the entity types whose actions are protected by permissions."
    )]
    async fn list_resources(
        &self,
        Parameters(params): Parameters<EnvironmentParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "list-resources", "tool call");
        Ok(into_call_result(
            self.client.list_resources(params.env_id.as_deref()).await,
        ))
    }

    #[tool(
        name = "get-resource",
        description = "Get one resource, including its actions, attributes, resource roles and relations."
    )]
    async fn get_resource(
        &self,
        Parameters(params): Parameters<GetResourceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "get-resource", resource = %params.resource_key, "tool call");
        Ok(into_call_result(
            self.client
                .get_resource(&params.resource_key, params.env_id.as_deref())
                .await,
        ))
    }

    #[tool(
        name = "list-users",
        description = "List users in an environment with optional pagination and search. Returns keys, emails, names and tenant associations."
    )]
    async fn list_users(
        &self,
        Parameters(params): Parameters<ListUsersParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "list-users", "tool call");
        let options = UserListOptions {
            page: params.page,
            per_page: params.per_page,
            search: params.search,
        };
        Ok(into_call_result(
            self.client
                .list_users(&options, params.env_id.as_deref())
                .await,
        ))
    }

    #[tool(
        name = "get-user",
        description = "Get one user, including attributes, associated tenants and role assignments."
    )]
    async fn get_user(
        &self,
        Parameters(params): Parameters<UserParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "get-user", user = %params.user_key, "tool call");
        Ok(into_call_result(
            self.client
                .get_user(&params.user_key, params.env_id.as_deref())
                .await,
        ))
    }

    #[tool(
        name = "get-user-permissions",
        description = "Get a user's effective permissions by joining their role assignments with the role definitions. Shows the permissions granted through each role in each tenant."
    )]
    async fn get_user_permissions(
        &self,
        Parameters(params): Parameters<UserParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!(tool = "get-user-permissions", user = %params.user_key, "tool call");
        Ok(into_call_result(
            self.client
                .get_user_permissions(&params.user_key, params.env_id.as_deref())
                .await,
        ))
    }
}

#[tool_handler]
impl ServerHandler for PermitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> PermitServer {
        let client = Permit::builder().api_key("test-key").build().unwrap();
        PermitServer::new(client)
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "permit-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("effective permissions"));
    }

    #[test]
    fn test_registered_tools() {
        let mut names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "get-environment",
                "get-resource",
                "get-role",
                "get-user",
                "get-user-permissions",
                "list-environments",
                "list-resources",
                "list-roles",
                "list-users",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_env_is_an_error_envelope() {
        let result = server()
            .get_role(Parameters(GetRoleParams {
                role_key: "admin".to_string(),
                env_id: None,
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
    }
}
