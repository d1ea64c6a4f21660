//! Tool Client port
//!
//! Defines the interface for talking to one remote tool provider (an MCP
//! server exposing a tool catalog).

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use taskbridge_domain::{ProviderId, ToolCallError, ToolDescriptor, ToolEnvelope};
use thiserror::Error;

/// Errors that can occur while talking to a tool provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolClientError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The tool ran and flagged its own result as an error
    #[error("{0}")]
    ToolError(String),
}

impl From<ToolClientError> for ToolCallError {
    fn from(err: ToolClientError) -> Self {
        match err {
            ToolClientError::ToolError(msg) => ToolCallError::ToolReported(msg),
            other => ToolCallError::Remote(other.to_string()),
        }
    }
}

/// Port for one tool provider
///
/// Implementations (adapters) live in the infrastructure layer and are
/// expected to establish their session lazily on first use.
#[async_trait]
pub trait ToolClientPort: Send + Sync {
    /// The provider this client talks to
    fn provider(&self) -> ProviderId;

    /// The provider's live tool catalog
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolClientError>;

    /// Invoke a tool with already-adapted arguments
    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolEnvelope, ToolClientError>;
}

/// Registered provider clients, at most one per provider.
#[derive(Clone, Default)]
pub struct ToolClients {
    clients: BTreeMap<ProviderId, Arc<dyn ToolClientPort>>,
}

impl ToolClients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client under its own provider id, replacing any previous one.
    pub fn register(mut self, client: Arc<dyn ToolClientPort>) -> Self {
        self.clients.insert(client.provider(), client);
        self
    }

    pub fn get(&self, provider: ProviderId) -> Option<&Arc<dyn ToolClientPort>> {
        self.clients.get(&provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.clients.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for ToolClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolClients")
            .field("providers", &self.clients.keys().collect::<Vec<_>>())
            .finish()
    }
}
