//! Intent classification
//!
//! Heuristic, keyword-driven reading of a user message:
//!
//! - [`needs_tools`] gates whether tools are consulted at all
//! - [`IntentSignals`] collects keywords, repository filters, the provider
//!   allow-list and the special intents (direct-create, single commit)
//! - [`rules`] holds every phrase table the heuristics match against

pub mod extract;
pub mod gate;
pub mod repo;
pub mod rules;

pub use extract::{
    DirectCreate, IntentSignals, allowed_providers, detect_direct_create, detect_specific_commit,
    extract_keywords,
};
pub use gate::needs_tools;
pub use repo::{RepoRef, extract_repo_filters};
pub use rules::Intent;
