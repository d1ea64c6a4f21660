//! Tool call value objects: the shapes a remote tool result can take
//! and the error recorded when a call fails.

use super::entities::ProviderId;
use serde_json::Value;
use thiserror::Error;

/// The observed shapes of a `tools/call` result envelope.
///
/// MCP servers disagree on where they put the payload: most embed JSON in
/// the first text content block, some return native structured content,
/// and some only return prose. Adapters classify the envelope once with
/// [`ToolEnvelope::classify`]; everything downstream works on plain JSON
/// via [`ToolEnvelope::into_payload`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEnvelope {
    /// First text block parsed as JSON
    JsonText(Value),
    /// Native structured content
    Structured(Value),
    /// Text that is not JSON
    RawText(String),
    /// Nothing usable in the envelope
    Empty,
}

impl ToolEnvelope {
    /// Classify an envelope from its first text block and structured content.
    ///
    /// Precedence: embedded JSON text, then structured content, then raw text.
    pub fn classify(first_text: Option<&str>, structured: Option<Value>) -> Self {
        if let Some(text) = first_text
            && let Ok(parsed) = serde_json::from_str::<Value>(text)
        {
            return ToolEnvelope::JsonText(parsed);
        }
        if let Some(value) = structured.filter(|v| !v.is_null()) {
            return ToolEnvelope::Structured(value);
        }
        match first_text {
            Some(text) => ToolEnvelope::RawText(text.to_string()),
            None => ToolEnvelope::Empty,
        }
    }

    /// Unwrap into the plain payload consumed by aggregation.
    pub fn into_payload(self) -> Value {
        match self {
            ToolEnvelope::JsonText(v) | ToolEnvelope::Structured(v) => v,
            ToolEnvelope::RawText(s) => Value::String(s),
            ToolEnvelope::Empty => Value::Null,
        }
    }
}

/// Why a planned call produced no payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolCallError {
    /// The remote call (or session setup) failed
    #[error("{0}")]
    Remote(String),

    /// The tool ran but reported an error result
    #[error("tool reported an error: {0}")]
    ToolReported(String),

    /// No client is registered for the task's provider
    #[error("no client registered for provider {0}")]
    UnknownProvider(ProviderId),
}
