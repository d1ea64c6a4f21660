//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod settings;
mod validation;

pub use settings::{PlannerSettings, split_csv};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
