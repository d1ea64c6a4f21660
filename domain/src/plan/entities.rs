//! Plan entities

use serde::Serialize;
use serde_json::{Map, Value};

use crate::tool::{Capability, ProviderId, ToolCallError, ToolDescriptor};

/// Provider-neutral argument map, before schema adaptation.
pub type LogicalArgs = Map<String, Value>;

/// Build a [`LogicalArgs`] map from key/value pairs.
pub fn logical_args<I>(entries: I) -> LogicalArgs
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// One planned remote call.
///
/// The descriptor is bound once at plan time and never re-resolved; the
/// arguments stay logical until the executor adapts them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub provider: ProviderId,
    /// Tool name as sent in `tools/call`
    pub tool: String,
    /// Resolved catalog entry (absent for the create-issue fallback)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ToolDescriptor>,
    pub args: LogicalArgs,
}

impl Task {
    /// A task bound to a resolved catalog entry.
    pub fn bound(provider: ProviderId, descriptor: &ToolDescriptor, args: LogicalArgs) -> Self {
        Self {
            provider,
            tool: descriptor.name.clone(),
            descriptor: Some(descriptor.clone()),
            args,
        }
    }

    /// A task calling a tool name that is not in the catalog.
    pub fn unbound(provider: ProviderId, tool: impl Into<String>, args: LogicalArgs) -> Self {
        Self {
            provider,
            tool: tool.into(),
            descriptor: None,
            args,
        }
    }

    /// `provider.tool`, as used in summaries and logs.
    pub fn label(&self) -> String {
        format!("{}.{}", self.provider, self.tool)
    }
}

/// The planner's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    pub tasks: Vec<Task>,
    /// Capabilities the message asked for that no catalog tool could serve
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<Capability>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// Result of executing one [`Task`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    pub task: Task,
    pub result: Result<Value, ToolCallError>,
}

impl CallOutcome {
    pub fn success(task: Task, payload: Value) -> Self {
        Self {
            task,
            result: Ok(payload),
        }
    }

    pub fn failure(task: Task, error: ToolCallError) -> Self {
        Self {
            task,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
