//! GitHub MCP client
//!
//! Runs the GitHub MCP server over stdio via `npx`. Calls pass through
//! unchanged; repository scoping for `github.repo_url` happens when the
//! plan's arguments are adapted, before they reach this client.

use crate::config::FileGithubConfig;
use crate::mcp::error::{McpError, Result};
use crate::mcp::launch::ServerLaunch;
use crate::mcp::session::{McpSession, ToolSession};
use async_trait::async_trait;
use serde_json::{Map, Value};
use taskbridge_application::{ToolClientError, ToolClientPort};
use taskbridge_domain::{ProviderId, ToolDescriptor, ToolEnvelope};

/// Server launch for a GitHub config.
pub fn github_launch(config: &FileGithubConfig) -> Result<ServerLaunch> {
    let token = config
        .token()
        .ok_or_else(|| McpError::MissingCredential("github.token".to_string()))?;

    Ok(ServerLaunch::new(config.command.clone(), config.args.clone())
        .with_env("GITHUB_PERSONAL_ACCESS_TOKEN", token)
        .with_env("GITHUB_TOOLSETS", config.toolsets.clone())
        .with_env("GITHUB_READ_ONLY", config.read_only.to_string()))
}

/// GitHub MCP client
pub struct GithubMcpClient<S = McpSession> {
    session: S,
}

impl GithubMcpClient {
    pub fn new(config: FileGithubConfig) -> Self {
        let session = McpSession::new(ProviderId::Github, move || github_launch(&config));
        Self { session }
    }
}

impl<S: ToolSession> GithubMcpClient<S> {
    pub async fn close(&self) {
        self.session.close().await;
    }
}

#[async_trait]
impl<S: ToolSession> ToolClientPort for GithubMcpClient<S> {
    fn provider(&self) -> ProviderId {
        ProviderId::Github
    }

    async fn list_tools(&self) -> std::result::Result<Vec<ToolDescriptor>, ToolClientError> {
        Ok(self.session.list_tools().await?)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> std::result::Result<ToolEnvelope, ToolClientError> {
        Ok(self.session.call_tool(name, arguments).await?)
    }
}
