//! Intent gate: does a message need tool data at all?

use super::rules::{TRIGGER_TERMS, contains_any};

/// Case-insensitive trigger-vocabulary test.
///
/// `false` means the message should be answered without tools and the
/// planner must not run.
pub fn needs_tools(text: &str) -> bool {
    contains_any(&text.to_lowercase(), TRIGGER_TERMS)
}
