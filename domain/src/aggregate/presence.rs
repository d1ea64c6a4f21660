//! Which provider's data an output carries, and deterministic listings of it.
//!
//! The downstream formatter picks its rendering from the first bucket key
//! with a `github_` or `jira_` prefix.

use serde_json::{Map, Value};

use super::aggregator::AggregateOutput;
use super::records::{as_text, first_truthy};
use crate::tool::ProviderId;
use crate::util::truncate_chars;

/// Items listed before the listing is cut off.
pub const LISTING_LIMIT: usize = 20;

const REPO_DESCRIPTION_CHARS: usize = 120;

/// Detected provider of a structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPresence {
    Provider(ProviderId),
    Unknown,
}

impl ProviderPresence {
    pub fn detect(output: &AggregateOutput) -> Self {
        output
            .as_structured()
            .map(Self::detect_keys)
            .unwrap_or(ProviderPresence::Unknown)
    }

    pub fn detect_keys(map: &Map<String, Value>) -> Self {
        for key in map.keys() {
            let lower = key.to_lowercase();
            if lower.starts_with("github_") {
                return ProviderPresence::Provider(ProviderId::Github);
            }
            if lower.starts_with("jira_") {
                return ProviderPresence::Provider(ProviderId::Jira);
            }
        }
        ProviderPresence::Unknown
    }

    pub fn provider(self) -> Option<ProviderId> {
        match self {
            ProviderPresence::Provider(p) => Some(p),
            ProviderPresence::Unknown => None,
        }
    }
}

/// Render an output as a plain-text bullet listing.
///
/// Summary text is returned as-is.
pub fn format_listing(output: &AggregateOutput) -> String {
    let Some(map) = output.as_structured() else {
        return output.render();
    };

    let mut sections = Vec::new();
    for (key, value) in map {
        let Some(items) = value.as_array() else {
            continue;
        };
        let render: fn(&Map<String, Value>) -> String = match key.as_str() {
            "jira_issues" => jira_issue_line,
            "github_issues" => forge_issue_line,
            "github_repositories" => repository_line,
            "github_commits" => commit_line,
            _ => continue,
        };

        let mut lines: Vec<String> = items
            .iter()
            .filter_map(Value::as_object)
            .take(LISTING_LIMIT)
            .map(render)
            .filter(|line| !line.trim().is_empty() && line.trim() != "-")
            .collect();
        if items.len() > LISTING_LIMIT {
            lines.push("... and more".to_string());
        }
        if !lines.is_empty() {
            sections.push(lines.join("\n"));
        }
    }

    if sections.is_empty() {
        output.render()
    } else {
        sections.join("\n\n")
    }
}

fn field(item: &Map<String, Value>, key: &str) -> String {
    first_truthy(item, &[key])
        .map(as_text)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// `- [KEY] summary - url`
fn jira_issue_line(item: &Map<String, Value>) -> String {
    let (key, summary, url) = (field(item, "key"), field(item, "summary"), field(item, "url"));
    if key.is_empty() && summary.is_empty() && url.is_empty() {
        return String::new();
    }
    format!("- [{}] {} - {}", key, summary, url)
}

/// `- #number title (state) url`
fn forge_issue_line(item: &Map<String, Value>) -> String {
    format!(
        "- #{} {} ({}) {}",
        field(item, "number"),
        field(item, "title"),
        field(item, "state"),
        field(item, "url")
    )
}

/// `- full_name: description (N stars) url`
fn repository_line(item: &Map<String, Value>) -> String {
    let description = field(item, "description");
    format!(
        "- {}: {} ({} stars) {}",
        field(item, "full_name"),
        truncate_chars(&description, REPO_DESCRIPTION_CHARS),
        item.get("stargazers_count")
            .filter(|v| !v.is_null())
            .map(as_text)
            .unwrap_or_else(|| "0".to_string()),
        field(item, "url")
    )
}

/// `- sha7 first-line author date url`
fn commit_line(item: &Map<String, Value>) -> String {
    let sha = field(item, "sha");
    let message = field(item, "message");
    format!(
        "- {} {} ({}, {}) {}",
        truncate_chars(&sha, 7),
        message.lines().next().unwrap_or_default(),
        field(item, "author"),
        field(item, "date"),
        field(item, "url")
    )
}
