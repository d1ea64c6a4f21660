//! Test doubles shared by the use case tests.

use crate::ports::tool_client::{ToolClientError, ToolClientPort};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use taskbridge_domain::{ProviderId, ToolDescriptor, ToolEnvelope};

/// Mock provider client with scripted listings and per-tool responses
pub struct MockToolClient {
    provider: ProviderId,
    listing: Result<Vec<ToolDescriptor>, ToolClientError>,
    responses: HashMap<String, Result<ToolEnvelope, ToolClientError>>,
    pub list_calls: AtomicUsize,
    pub calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl MockToolClient {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            listing: Ok(Vec::new()),
            responses: HashMap::new(),
            list_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.listing = Ok(tools);
        self
    }

    pub fn with_listing_error(mut self, err: ToolClientError) -> Self {
        self.listing = Err(err);
        self
    }

    pub fn with_json(mut self, tool: &str, payload: Value) -> Self {
        self.responses
            .insert(tool.to_string(), Ok(ToolEnvelope::JsonText(payload)));
        self
    }

    pub fn with_error(mut self, tool: &str, err: ToolClientError) -> Self {
        self.responses.insert(tool.to_string(), Err(err));
        self
    }

    pub fn recorded_calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolClientPort for MockToolClient {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listing.clone()
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolEnvelope, ToolClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments));
        self.responses
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ToolClientError::ToolError(format!("unknown tool: {}", name))))
    }
}
