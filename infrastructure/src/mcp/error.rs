//! Error types for the MCP clients

use taskbridge_application::ToolClientError;
use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur when talking to an MCP server
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Failed to spawn MCP server: {0}")]
    SpawnError(#[from] std::io::Error),

    #[error("MCP handshake failed: {0}")]
    HandshakeError(String),

    #[error("MCP request failed: {0}")]
    RequestError(String),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The tool ran and flagged its result as an error
    #[error("{0}")]
    ToolError(String),
}

impl McpError {
    /// Whether the server rejected the call because the tool name is unknown.
    ///
    /// Servers report this in prose, so the check is on the message. "not
    /// found" only counts after the word "tool"; a missing issue is a real
    /// error, not a missing tool.
    pub fn is_missing_tool(&self) -> bool {
        let message = self.to_string().to_lowercase();
        if message.contains("unknown tool") || message.contains("no such tool") {
            return true;
        }
        message
            .find("tool")
            .is_some_and(|at| message[at..].contains("not found"))
    }
}

impl From<McpError> for ToolClientError {
    fn from(err: McpError) -> Self {
        match err {
            McpError::MissingCredential(name) => ToolClientError::MissingCredential(name),
            McpError::SpawnError(_) | McpError::HandshakeError(_) => {
                ToolClientError::ConnectionError(err.to_string())
            }
            McpError::RequestError(msg) => ToolClientError::RequestFailed(msg),
            McpError::SerializationError(_) | McpError::UnexpectedResponse(_) => {
                ToolClientError::MalformedResponse(err.to_string())
            }
            McpError::ToolError(msg) => ToolClientError::ToolError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_detection() {
        assert!(McpError::RequestError("Unknown tool: jira_search".into()).is_missing_tool());
        assert!(McpError::ToolError("Tool not found".into()).is_missing_tool());
        assert!(McpError::RequestError("no such tool 'x'".into()).is_missing_tool());
        assert!(McpError::RequestError("Mcp error: -32602: Tool jira_search not found".into())
            .is_missing_tool());
        assert!(!McpError::RequestError("401 Unauthorized".into()).is_missing_tool());
    }

    #[test]
    fn test_missing_issue_is_not_missing_tool() {
        assert!(!McpError::ToolError("Issue OPS-9 not found".into()).is_missing_tool());
        assert!(!McpError::ToolError("Not found: project OPS".into()).is_missing_tool());
    }

    #[test]
    fn test_into_tool_client_error() {
        assert_eq!(
            ToolClientError::from(McpError::MissingCredential("github.token".into())),
            ToolClientError::MissingCredential("github.token".into())
        );
        assert_eq!(
            ToolClientError::from(McpError::ToolError("bad jql".into())),
            ToolClientError::ToolError("bad jql".into())
        );
        assert!(matches!(
            ToolClientError::from(McpError::HandshakeError("eof".into())),
            ToolClientError::ConnectionError(_)
        ));
    }
}
