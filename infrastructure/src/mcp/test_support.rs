//! Test doubles shared by the MCP client tests.

use crate::mcp::error::{McpError, Result};
use crate::mcp::session::ToolSession;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use taskbridge_domain::{ToolDescriptor, ToolEnvelope};

type Responder = Box<dyn Fn() -> Result<ToolEnvelope> + Send + Sync>;

/// Session with scripted per-tool responses that records every call
#[derive(Default)]
pub struct ScriptedSession {
    tools: Vec<ToolDescriptor>,
    responses: HashMap<String, Responder>,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
    pub closes: AtomicUsize,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_json(mut self, tool: &str, payload: Value) -> Self {
        self.responses.insert(
            tool.to_string(),
            Box::new(move || Ok(ToolEnvelope::JsonText(payload.clone()))),
        );
        self
    }

    pub fn with_error<F>(mut self, tool: &str, err: F) -> Self
    where
        F: Fn() -> McpError + Send + Sync + 'static,
    {
        self.responses
            .insert(tool.to_string(), Box::new(move || Err(err())));
        self
    }

    pub fn recorded_calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_tools(&self) -> Vec<String> {
        self.recorded_calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl ToolSession for ScriptedSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<ToolEnvelope> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));
        match self.responses.get(name) {
            Some(respond) => respond(),
            None => Err(McpError::ToolError(format!("Unknown tool: {}", name))),
        }
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
