//! Application layer for taskbridge
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::tool_client::{ToolClientError, ToolClientPort, ToolClients};
pub use use_cases::catalog_cache::ToolCatalogCache;
pub use use_cases::execute_plan::ExecutePlanUseCase;
pub use use_cases::orchestrate::{OrchestrateUseCase, OrchestrationContext, OrchestrationOutcome};
