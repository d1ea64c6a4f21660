//! Tool domain module
//!
//! Remote tools come from MCP providers (Jira, GitHub) whose catalogs are
//! discovered at runtime. This module holds what the rest of the domain
//! needs to reason about them without any I/O:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolCatalog  │───▶│ Capability   │───▶│ToolDescriptor│
//! │ (discovered) │    │ (resolver)   │    │ (bound task) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! - [`ToolCatalog`] / [`ProviderCatalog`]: per-provider tool listings
//! - [`Capability`]: abstract operations resolved against a catalog by
//!   preferred name first, then by name/description tokens
//! - [`ToolEnvelope`]: the tagged shapes of a `tools/call` result
//! - [`ToolCallError`]: the per-task failure recorded by the executor

pub mod entities;
pub mod resolver;
pub mod value_objects;

pub use entities::{ProviderCatalog, ProviderId, ToolCatalog, ToolDescriptor};
pub use resolver::{CAPABILITY_RULES, Capability, CapabilityRule, FALLBACK_CREATE_TOOL, resolve_tool};
pub use value_objects::{ToolCallError, ToolEnvelope};
