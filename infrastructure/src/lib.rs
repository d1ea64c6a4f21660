//! Infrastructure layer for taskbridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: MCP stdio clients for Jira and GitHub,
//! and configuration file loading.

pub mod config;
pub mod mcp;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileGithubConfig, FileJiraConfig};
pub use mcp::{
    GithubMcpClient, JiraMcpClient, McpClients, McpError, McpSession, ServerLaunch, ToolSession,
};
