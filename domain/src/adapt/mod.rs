//! Argument adaptation
//!
//! Tasks carry logical arguments (`jql`, `perPage`, `owner`, ...). Right
//! before a call, [`ArgumentAdapter`] rewrites them into whatever keys the
//! tool's declared schema uses, applies provider scoping, and drops keys the
//! schema does not accept.

pub mod adapter;
pub mod rules;

pub use adapter::ArgumentAdapter;
pub use rules::{GITHUB_KEY_RULES, JIRA_KEY_RULES, KeyRule, key_rules};
