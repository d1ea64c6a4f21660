//! GitHub provider configuration from TOML (`[github]` section)

use serde::{Deserialize, Serialize};

/// GitHub MCP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGithubConfig {
    /// Personal access token handed to the server.
    pub token: Option<String>,
    /// Comma-separated `owner/name` repos searched when a question names none.
    pub default_repos: String,
    /// When set, every GitHub call is scoped to this repository.
    pub repo_url: Option<String>,
    /// Server toolsets (default: "repos,issues,pull_requests,actions,code_security").
    pub toolsets: String,
    /// Start the server in read-only mode.
    pub read_only: bool,
    /// Server executable (default: "npx").
    pub command: String,
    /// Server arguments.
    pub args: Vec<String>,
}

impl Default for FileGithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            default_repos: String::new(),
            repo_url: None,
            toolsets: "repos,issues,pull_requests,actions,code_security".to_string(),
            read_only: false,
            command: "npx".to_string(),
            args: vec![
                "-y".to_string(),
                "@modelcontextprotocol/server-github".to_string(),
            ],
        }
    }
}

impl FileGithubConfig {
    /// The token, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}
