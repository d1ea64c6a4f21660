//! Result aggregation
//!
//! Each [`CallOutcome`](crate::plan::CallOutcome) is normalized into
//! [`CanonicalRecord`]s grouped by [`Bucket`], summarized as one line per
//! task, and mined for up to five [`Citation`]s. [`Aggregator::aggregate`]
//! returns the bucket map when anything normalized, the summary text
//! otherwise.

pub mod aggregator;
pub mod citation;
pub mod presence;
pub mod records;

pub use aggregator::{AggregateOutput, AggregateResult, Aggregator, NO_RESULTS, item_count};
pub use citation::{Citation, MAX_CITATIONS_PER_TASK, PREVIEW_CHARS};
pub use presence::{ProviderPresence, format_listing};
pub use records::{Bucket, CanonicalRecord, Commit, ForgeIssue, ForgeToolKind, Repository, TrackerIssue};
