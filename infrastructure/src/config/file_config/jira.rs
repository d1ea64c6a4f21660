//! Jira provider configuration from TOML (`[jira]` section)

use serde::{Deserialize, Serialize};

/// Jira MCP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJiraConfig {
    /// Jira base URL, e.g. `https://acme.atlassian.net`.
    pub url: Option<String>,
    pub username: Option<String>,
    pub api_token: Option<String>,
    /// Verify TLS certificates (default: true).
    pub verify_ssl: bool,
    /// Project used when filing issues directly from a message.
    pub default_project_key: Option<String>,
    /// Docker image for the server; used only when `docker` is on PATH.
    pub server_image: Option<String>,
    /// Server executable when not using docker (default: "npx").
    pub command: String,
    /// Server arguments when not using docker.
    pub args: Vec<String>,
}

impl Default for FileJiraConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            api_token: None,
            verify_ssl: true,
            default_project_key: None,
            server_image: None,
            command: "npx".to_string(),
            args: vec![
                "-y".to_string(),
                "@modelcontextprotocol/server-atlassian".to_string(),
            ],
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Credentials required to start the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JiraCredentials<'a> {
    pub url: &'a str,
    pub username: &'a str,
    pub api_token: &'a str,
}

impl FileJiraConfig {
    /// Url, username and token, or the names of the missing fields.
    pub fn credentials(&self) -> Result<JiraCredentials<'_>, Vec<&'static str>> {
        let url = non_blank(&self.url);
        let username = non_blank(&self.username);
        let api_token = non_blank(&self.api_token);

        match (url, username, api_token) {
            (Some(url), Some(username), Some(api_token)) => Ok(JiraCredentials {
                url,
                username,
                api_token,
            }),
            _ => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push("jira.url");
                }
                if username.is_none() {
                    missing.push("jira.username");
                }
                if api_token.is_none() {
                    missing.push("jira.api_token");
                }
                Err(missing)
            }
        }
    }

    pub fn server_image(&self) -> Option<&str> {
        non_blank(&self.server_image)
    }
}
