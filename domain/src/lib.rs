//! Domain layer for taskbridge
//!
//! This crate contains the planning core: everything between a raw user
//! message and a normalized, citable result. It performs no I/O and has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Pipeline
//!
//! ```text
//! text ─▶ needs_tools ─▶ Planner ─▶ Vec<Task> ─▶ (executor) ─▶ Vec<CallOutcome> ─▶ Aggregator
//!              │            │                        │
//!              │            ├─ IntentSignals         └─ ArgumentAdapter (per call)
//!              │            └─ Capability resolver
//!              └─ false: answer without tools
//! ```
//!
//! The executor and the catalog cache live in the application layer; they
//! need async I/O through the `ToolClientPort`.

pub mod adapt;
pub mod aggregate;
pub mod config;
pub mod intent;
pub mod plan;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use adapt::ArgumentAdapter;
pub use aggregate::{
    AggregateOutput, AggregateResult, Aggregator, Bucket, CanonicalRecord, Citation,
    ProviderPresence, format_listing,
};
pub use config::{ConfigIssue, ConfigIssueCode, PlannerSettings, Severity};
pub use intent::{IntentSignals, RepoRef, needs_tools};
pub use plan::{CallOutcome, LogicalArgs, Plan, Planner, Task};
pub use tool::{
    Capability, ProviderCatalog, ProviderId, ToolCallError, ToolCatalog, ToolDescriptor,
    ToolEnvelope,
};
