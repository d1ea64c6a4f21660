//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod catalog_cache;
pub mod execute_plan;
pub mod orchestrate;

#[cfg(test)]
pub(crate) mod test_support;
