//! `permit-mcp` binary: serves the Permit tools over stdio.

use permit_mcp::{init_tracing, PermitServer};
use permit_sdk::{Permit, PermitConfig};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = PermitConfig::from_env().inspect_err(|e| tracing::error!("{}", e))?;
    let client = Permit::new(&config)?;

    tracing::info!(
        project = %config.project_id,
        default_env = config.default_env_id.as_deref().unwrap_or("<none>"),
        "Permit MCP server running on stdio"
    );

    let service = PermitServer::new(client)
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to start MCP server"))?;

    service.waiting().await?;
    Ok(())
}
