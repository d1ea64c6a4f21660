//! Planning
//!
//! [`Planner`] turns a message and the discovered [`ToolCatalog`](crate::tool::ToolCatalog)
//! into a [`Plan`]: an ordered list of [`Task`]s, each bound to a provider,
//! a concrete tool and logical (not yet schema-adapted) arguments.

pub mod entities;
pub mod planner;

pub use entities::{CallOutcome, LogicalArgs, Plan, Task, logical_args};
pub use planner::{Planner, RESULT_LIMIT, forge_issue_query, tracker_jql};
