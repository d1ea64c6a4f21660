//! Outcome aggregation: structured buckets, summary lines and citations.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::citation::{Citation, citations_for};
use super::records::{
    Bucket, CanonicalRecord, ForgeToolKind, commits_from_payload, forge_issues_from_payload,
    repositories_from_payload, single_commit_from_payload, tracker_issues_from_payload,
};
use crate::config::PlannerSettings;
use crate::plan::{CallOutcome, Task};
use crate::tool::ProviderId;

/// Output when no task ran at all.
pub const NO_RESULTS: &str = "No results found.";

/// The primary output handed to the downstream formatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateOutput {
    /// Bucket key (`jira_issues`, `github_commits`, ...) → records
    Structured(Map<String, Value>),
    /// Per-task summary lines when nothing normalized into a bucket
    Summary(String),
}

impl AggregateOutput {
    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            AggregateOutput::Structured(map) => Some(map),
            AggregateOutput::Summary(_) => None,
        }
    }

    /// Compact JSON for structured output, the text itself otherwise.
    pub fn render(&self) -> String {
        match self {
            AggregateOutput::Structured(map) => Value::Object(map.clone()).to_string(),
            AggregateOutput::Summary(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub output: AggregateOutput,
    pub sources: Vec<Citation>,
    /// `provider.tool: N results` / `provider.tool: error ...`, one per task
    #[serde(skip)]
    pub lines: Vec<String>,
}

pub struct Aggregator<'a> {
    settings: &'a PlannerSettings,
}

impl<'a> Aggregator<'a> {
    pub fn new(settings: &'a PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn aggregate(&self, outcomes: &[CallOutcome]) -> AggregateResult {
        let mut lines = Vec::with_capacity(outcomes.len());
        let mut buckets: BTreeMap<Bucket, Vec<CanonicalRecord>> = BTreeMap::new();
        let mut sources = Vec::new();

        for outcome in outcomes {
            let label = outcome.task.label();
            let payload = match &outcome.result {
                Ok(payload) => payload,
                Err(e) => {
                    lines.push(format!("{}: error {}", label, e));
                    continue;
                }
            };

            lines.push(format!("{}: {} results", label, item_count(payload)));

            let records = self.normalize(&outcome.task, payload);
            sources.extend(task_citations(payload, &records));
            for record in records {
                buckets.entry(record.bucket()).or_default().push(record);
            }
        }

        let output = if buckets.is_empty() {
            AggregateOutput::Summary(if lines.is_empty() {
                NO_RESULTS.to_string()
            } else {
                lines.join("\n")
            })
        } else {
            AggregateOutput::Structured(
                buckets
                    .into_iter()
                    .map(|(bucket, records)| {
                        let values = records.iter().map(|r| Value::Object(r.to_object()));
                        (bucket.key().to_string(), Value::Array(values.collect()))
                    })
                    .collect(),
            )
        };

        AggregateResult {
            output,
            sources,
            lines,
        }
    }

    /// Canonical records for one successful task.
    pub fn normalize(&self, task: &Task, payload: &Value) -> Vec<CanonicalRecord> {
        match task.provider {
            ProviderId::Jira => {
                tracker_issues_from_payload(payload, |key| self.settings.browse_url(key))
                    .into_iter()
                    .map(CanonicalRecord::TrackerIssue)
                    .collect()
            }
            ProviderId::Github => match ForgeToolKind::from_tool_name(&task.tool) {
                Some(ForgeToolKind::Issues) => forge_issues_from_payload(payload)
                    .into_iter()
                    .map(CanonicalRecord::ForgeIssue)
                    .collect(),
                Some(ForgeToolKind::Repositories) => repositories_from_payload(payload)
                    .into_iter()
                    .map(CanonicalRecord::Repository)
                    .collect(),
                Some(ForgeToolKind::Commits) => commits_from_payload(payload)
                    .into_iter()
                    .map(CanonicalRecord::Commit)
                    .collect(),
                Some(ForgeToolKind::SingleCommit) => single_commit_from_payload(payload)
                    .into_iter()
                    .map(CanonicalRecord::Commit)
                    .collect(),
                None => Vec::new(),
            },
        }
    }
}

/// Array length, 1 for an object, 0 for anything else.
pub fn item_count(payload: &Value) -> usize {
    match payload {
        Value::Array(items) => items.len(),
        Value::Object(_) => 1,
        _ => 0,
    }
}

/// Citations for one task: the raw issue list when the payload carries one,
/// otherwise the records this task produced.
fn task_citations(payload: &Value, records: &[CanonicalRecord]) -> Vec<Citation> {
    if let Some(issues) = raw_issue_list(payload) {
        return citations_for(issues.iter().filter_map(Value::as_object));
    }
    let objects: Vec<Map<String, Value>> = records.iter().map(CanonicalRecord::to_object).collect();
    citations_for(&objects)
}

fn raw_issue_list(payload: &Value) -> Option<&Vec<Value>> {
    let holder = match payload {
        Value::Array(entries) => entries.first()?,
        other => other,
    };
    holder.get("issues").and_then(Value::as_array)
}
