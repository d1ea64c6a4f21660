//! Jira MCP client
//!
//! Runs the Atlassian MCP server over stdio, either from a docker image
//! (when `jira.server_image` is set and docker is installed) or via `npx`.
//!
//! Server builds disagree on tool names. Every port call goes out under the
//! name it was given; when the server reports a known tool as missing, the
//! call is retried once under its legacy name with legacy argument keys.

use crate::config::FileJiraConfig;
use crate::mcp::error::{McpError, Result};
use crate::mcp::launch::{ServerLaunch, docker_available};
use crate::mcp::session::{McpSession, ToolSession};
use async_trait::async_trait;
use serde_json::{Map, Value};
use taskbridge_application::{ToolClientError, ToolClientPort};
use taskbridge_domain::{ProviderId, ToolDescriptor, ToolEnvelope};
use tracing::warn;

const ENV_KEYS: [&str; 4] = ["JIRA_URL", "JIRA_USERNAME", "JIRA_API_TOKEN", "JIRA_VERIFY_SSL"];

/// Server launch for a Jira config.
pub fn jira_launch(config: &FileJiraConfig, docker: bool) -> Result<ServerLaunch> {
    let creds = config.credentials().map_err(|missing| {
        McpError::MissingCredential(missing.join(", "))
    })?;

    let mut launch = match config.server_image() {
        Some(image) if docker => {
            let mut args = vec!["run".to_string(), "-i".to_string(), "--rm".to_string()];
            for key in ENV_KEYS {
                args.push("-e".to_string());
                args.push(key.to_string());
            }
            args.push(image.to_string());
            ServerLaunch::new("docker", args)
        }
        _ => ServerLaunch::new(config.command.clone(), config.args.clone()),
    };

    launch = launch
        .with_env("JIRA_URL", creds.url)
        .with_env("JIRA_USERNAME", creds.username)
        .with_env("JIRA_API_TOKEN", creds.api_token)
        .with_env("JIRA_VERIFY_SSL", config.verify_ssl.to_string());
    Ok(launch)
}

/// A current tool name, its legacy equivalent and the argument keys that
/// differ between the two.
struct LegacyName {
    modern: &'static str,
    legacy: &'static str,
    renames: &'static [(&'static str, &'static str)],
}

const LEGACY_NAMES: &[LegacyName] = &[
    LegacyName {
        modern: "jira_search",
        legacy: "search_issues",
        renames: &[("limit", "maxResults")],
    },
    LegacyName {
        modern: "jira_get_issue",
        legacy: "get_issue",
        renames: &[("issue_key", "key")],
    },
    LegacyName {
        modern: "jira_create_issue",
        legacy: "create_issue",
        renames: &[("project_key", "projectKey"), ("issue_type", "issueType")],
    },
];

/// The legacy name and arguments for `name`, if it has one.
fn legacy_call(name: &str, arguments: &Map<String, Value>) -> Option<(&'static str, Map<String, Value>)> {
    let entry = LEGACY_NAMES
        .iter()
        .find(|entry| entry.modern.eq_ignore_ascii_case(name))?;
    let args = arguments
        .iter()
        .map(|(key, value)| {
            let key = entry
                .renames
                .iter()
                .find(|(modern, _)| *modern == key.as_str())
                .map_or_else(|| key.clone(), |(_, legacy)| legacy.to_string());
            (key, value.clone())
        })
        .collect();
    Some((entry.legacy, args))
}

/// Jira MCP client
pub struct JiraMcpClient<S = McpSession> {
    session: S,
}

impl JiraMcpClient {
    pub fn new(config: FileJiraConfig) -> Self {
        let session = McpSession::new(ProviderId::Jira, move || {
            jira_launch(&config, docker_available())
        });
        Self { session }
    }
}

impl<S: ToolSession> JiraMcpClient<S> {
    pub async fn close(&self) {
        self.session.close().await;
    }

    async fn call_with_fallback(&self, name: &str, arguments: Map<String, Value>) -> Result<ToolEnvelope> {
        let legacy = legacy_call(name, &arguments);
        match self.session.call_tool(name, arguments).await {
            Err(e) if e.is_missing_tool() => match legacy {
                Some((legacy, args)) => {
                    warn!("{} unavailable ({}), retrying as {}", name, e, legacy);
                    self.session.call_tool(legacy, args).await
                }
                None => Err(e),
            },
            result => result,
        }
    }
}

#[async_trait]
impl<S: ToolSession> ToolClientPort for JiraMcpClient<S> {
    fn provider(&self) -> ProviderId {
        ProviderId::Jira
    }

    async fn list_tools(&self) -> std::result::Result<Vec<ToolDescriptor>, ToolClientError> {
        Ok(self.session.list_tools().await?)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> std::result::Result<ToolEnvelope, ToolClientError> {
        Ok(self.call_with_fallback(name, arguments).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::test_support::ScriptedSession;
    use serde_json::json;

    fn configured() -> FileJiraConfig {
        FileJiraConfig {
            url: Some("https://acme.atlassian.net".to_string()),
            username: Some("ann".to_string()),
            api_token: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_npx_launch_by_default() {
        let launch = jira_launch(&configured(), true).unwrap();
        assert_eq!(launch.program, "npx");
        assert_eq!(launch.args, vec!["-y", "@modelcontextprotocol/server-atlassian"]);
        assert_eq!(launch.env_value("JIRA_URL"), Some("https://acme.atlassian.net"));
        assert_eq!(launch.env_value("JIRA_VERIFY_SSL"), Some("true"));
    }

    #[test]
    fn test_docker_launch_when_image_and_docker() {
        let config = FileJiraConfig {
            server_image: Some("ghcr.io/acme/jira-mcp".to_string()),
            verify_ssl: false,
            ..configured()
        };
        let launch = jira_launch(&config, true).unwrap();
        assert_eq!(launch.program, "docker");
        assert_eq!(&launch.args[..3], ["run", "-i", "--rm"]);
        assert_eq!(launch.args.last().map(String::as_str), Some("ghcr.io/acme/jira-mcp"));
        assert!(launch.args.contains(&"JIRA_API_TOKEN".to_string()));
        assert_eq!(launch.env_value("JIRA_VERIFY_SSL"), Some("false"));
    }

    #[test]
    fn test_image_ignored_without_docker() {
        let config = FileJiraConfig {
            server_image: Some("ghcr.io/acme/jira-mcp".to_string()),
            ..configured()
        };
        assert_eq!(jira_launch(&config, false).unwrap().program, "npx");
    }

    #[test]
    fn test_missing_credentials() {
        let err = jira_launch(&FileJiraConfig::default(), false).unwrap_err();
        assert!(matches!(err, McpError::MissingCredential(ref m) if m.contains("jira.api_token")));
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn scripted(session: ScriptedSession) -> JiraMcpClient<ScriptedSession> {
        JiraMcpClient { session }
    }

    #[test]
    fn test_legacy_call_renames_keys() {
        let (name, legacy) =
            legacy_call("JIRA_GET_ISSUE", &args(json!({"issue_key": "OPS-1", "fields": "summary"})))
                .unwrap();
        assert_eq!(name, "get_issue");
        assert_eq!(Value::Object(legacy), json!({"key": "OPS-1", "fields": "summary"}));
        assert!(legacy_call("jira_add_comment", &Map::new()).is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_retries_with_legacy_args() {
        let client = scripted(
            ScriptedSession::new().with_json("search_issues", json!({"issues": [{"key": "OPS-1"}]})),
        );

        let envelope = client
            .call_tool("jira_search", args(json!({"jql": "project = OPS", "limit": 10})))
            .await
            .unwrap();

        assert_eq!(envelope, ToolEnvelope::JsonText(json!({"issues": [{"key": "OPS-1"}]})));
        let calls = client.session.recorded_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "jira_search");
        assert_eq!(calls[1].0, "search_issues");
        assert_eq!(
            Value::Object(calls[1].1.clone()),
            json!({"jql": "project = OPS", "maxResults": 10})
        );
    }

    #[tokio::test]
    async fn test_create_retry_uses_camel_case_keys() {
        let client = scripted(ScriptedSession::new().with_json("create_issue", json!({"key": "OPS-7"})));

        client
            .call_tool(
                "jira_create_issue",
                args(json!({
                    "project_key": "OPS",
                    "summary": "Login fails",
                    "issue_type": "Task",
                })),
            )
            .await
            .unwrap();

        let calls = client.session.recorded_calls();
        assert_eq!(calls[1].0, "create_issue");
        assert_eq!(
            Value::Object(calls[1].1.clone()),
            json!({"projectKey": "OPS", "summary": "Login fails", "issueType": "Task"})
        );
    }

    #[tokio::test]
    async fn test_modern_name_succeeds_without_retry() {
        let client = scripted(ScriptedSession::new().with_json("jira_get_issue", json!({"key": "OPS-1"})));

        client
            .call_tool("jira_get_issue", args(json!({"issue_key": "OPS-1"})))
            .await
            .unwrap();

        assert_eq!(client.session.called_tools(), vec!["jira_get_issue"]);
    }

    #[tokio::test]
    async fn test_other_errors_propagate_without_retry() {
        let client = scripted(
            ScriptedSession::new()
                .with_error("jira_search", || McpError::RequestError("401 Unauthorized".into())),
        );

        let err = client
            .call_tool("jira_search", args(json!({"jql": "project = OPS"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolClientError::RequestFailed(ref m) if m == "401 Unauthorized"));
        assert_eq!(client.session.called_tools(), vec!["jira_search"]);
    }

    #[tokio::test]
    async fn test_missing_issue_is_not_retried() {
        let client = scripted(
            ScriptedSession::new()
                .with_error("jira_get_issue", || McpError::ToolError("Issue OPS-9 not found".into())),
        );

        let err = client
            .call_tool("jira_get_issue", args(json!({"issue_key": "OPS-9"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolClientError::ToolError(_)));
        assert_eq!(client.session.called_tools(), vec!["jira_get_issue"]);
    }

    #[tokio::test]
    async fn test_missing_tool_without_legacy_name_fails() {
        let client = scripted(ScriptedSession::new());

        let err = client
            .call_tool("jira_add_comment", args(json!({"issue_key": "OPS-1"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolClientError::ToolError(_)));
        assert_eq!(client.session.called_tools(), vec!["jira_add_comment"]);
    }

    #[tokio::test]
    async fn test_unconfigured_client_reports_missing_credential() {
        let client = JiraMcpClient::new(FileJiraConfig::default());
        let err = client.list_tools().await.unwrap_err();
        assert!(matches!(err, ToolClientError::MissingCredential(_)));
    }
}
