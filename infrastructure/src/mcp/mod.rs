//! MCP stdio clients for the Jira and GitHub tool servers.
//!
//! Each client owns a lazily started [`McpSession`]; nothing is spawned
//! until the first tool listing or call.

pub mod error;
pub mod github;
pub mod jira;
pub mod launch;
pub mod session;
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{McpError, Result};
pub use github::GithubMcpClient;
pub use jira::JiraMcpClient;
pub use launch::ServerLaunch;
pub use session::{McpSession, ToolSession};

use crate::config::FileConfig;
use std::sync::Arc;
use taskbridge_application::ToolClients;

/// Both provider clients, built from one configuration.
pub struct McpClients {
    pub jira: Arc<JiraMcpClient>,
    pub github: Arc<GithubMcpClient>,
}

impl McpClients {
    pub fn from_config(config: &FileConfig) -> Self {
        Self {
            jira: Arc::new(JiraMcpClient::new(config.jira.clone())),
            github: Arc::new(GithubMcpClient::new(config.github.clone())),
        }
    }

    /// The clients as ports for the application layer.
    pub fn tool_clients(&self) -> ToolClients {
        ToolClients::new()
            .register(self.jira.clone())
            .register(self.github.clone())
    }

    /// Shut down whichever servers were started.
    pub async fn close(&self) {
        self.jira.close().await;
        self.github.close().await;
    }
}
