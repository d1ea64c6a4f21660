//! MCP session management.
//!
//! Provides [`McpSession`], a lazily started stdio connection to one MCP
//! server. The server process is spawned on the first request and lives
//! until [`ToolSession::close`].

use crate::mcp::error::{McpError, Result};
use crate::mcp::launch::ServerLaunch;
use async_trait::async_trait;
use rmcp::{
    model::CallToolRequestParam,
    service::{Peer, RoleClient, RunningService, ServiceExt},
    transport::TokioChildProcess,
};
use serde_json::{Map, Value};
use taskbridge_domain::{ProviderId, ToolDescriptor, ToolEnvelope};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

type Launcher = Box<dyn Fn() -> Result<ServerLaunch> + Send + Sync>;

/// The request surface a provider client needs from its server connection.
#[async_trait]
pub trait ToolSession: Send + Sync {
    /// The server's full tool listing.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>>;

    /// Call a tool and classify its result envelope.
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<ToolEnvelope>;

    /// Shut the connection down. A later request may start a fresh one.
    async fn close(&self);
}

/// A lazily connected MCP client session for one provider.
pub struct McpSession {
    provider: ProviderId,
    launcher: Launcher,
    service: Mutex<Option<RunningService<RoleClient, ()>>>,
}

impl McpSession {
    /// `launcher` is invoked once, on first use; credential checks belong there.
    pub fn new<F>(provider: ProviderId, launcher: F) -> Self
    where
        F: Fn() -> Result<ServerLaunch> + Send + Sync + 'static,
    {
        Self {
            provider,
            launcher: Box::new(launcher),
            service: Mutex::new(None),
        }
    }

    /// A handle for issuing requests, connecting first if needed.
    async fn peer(&self) -> Result<Peer<RoleClient>> {
        let mut guard = self.service.lock().await;
        if let Some(service) = guard.as_ref() {
            return Ok(service.peer().clone());
        }

        let launch = (self.launcher)()?;
        info!("Starting {} MCP server: {}", self.provider, launch);
        let transport = TokioChildProcess::new(launch.command())?;
        let service = ()
            .serve(transport)
            .await
            .map_err(|e| McpError::HandshakeError(e.to_string()))?;
        debug!("{} MCP session established", self.provider);

        let peer = service.peer().clone();
        *guard = Some(service);
        Ok(peer)
    }
}

#[async_trait]
impl ToolSession for McpSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let peer = self.peer().await?;
        let tools = peer
            .list_all_tools()
            .await
            .map_err(|e| McpError::RequestError(e.to_string()))?;
        let raw = serde_json::to_value(&tools)?;
        Ok(descriptors_from_listing(&raw))
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<ToolEnvelope> {
        let peer = self.peer().await?;
        debug!("{} tools/call {}", self.provider, name);
        let result = peer
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: Some(arguments),
            })
            .await
            .map_err(|e| McpError::RequestError(e.to_string()))?;
        envelope_from_result(&serde_json::to_value(&result)?)
    }

    async fn close(&self) {
        let Some(service) = self.service.lock().await.take() else {
            return;
        };
        match service.cancel().await {
            Ok(reason) => debug!("{} MCP session closed: {:?}", self.provider, reason),
            Err(e) => warn!("{} MCP session did not shut down cleanly: {}", self.provider, e),
        }
    }
}

/// Descriptors for every well-formed entry of a `tools/list` result.
pub(crate) fn descriptors_from_listing(raw: &Value) -> Vec<ToolDescriptor> {
    raw.as_array()
        .map(|tools| tools.iter().filter_map(ToolDescriptor::from_listing).collect())
        .unwrap_or_default()
}

/// Classify a serialized `tools/call` result.
///
/// `isError: true` becomes [`McpError::ToolError`] carrying the first text block.
pub(crate) fn envelope_from_result(raw: &Value) -> Result<ToolEnvelope> {
    if !raw.is_object() {
        return Err(McpError::UnexpectedResponse(raw.to_string()));
    }

    let first_text = raw
        .get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str);

    if raw.get("isError").and_then(Value::as_bool).unwrap_or(false) {
        let message = first_text.unwrap_or("tool returned an error");
        return Err(McpError::ToolError(message.to_string()));
    }

    Ok(ToolEnvelope::classify(
        first_text,
        raw.get("structuredContent").cloned(),
    ))
}
