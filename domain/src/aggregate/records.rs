//! Canonical records and payload normalization.
//!
//! Provider payloads arrive in many shapes. Each `*_from_payload` function
//! walks the shapes it knows and yields typed records; anything it does not
//! recognize contributes nothing.

use serde::Serialize;
use serde_json::{Map, Value};

/// JSON truthiness: null, false, 0, "" and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// First truthy value among `keys`.
pub fn first_truthy<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| is_truthy(v))
}

/// Render a scalar (or nested JSON) as display text.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_truthy(obj, keys).map(as_text)
}

fn object_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

/// Object elements of an array, skipping anything else.
fn objects(items: &[Value]) -> impl Iterator<Item = &Map<String, Value>> {
    items.iter().filter_map(Value::as_object)
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

/// The `html_url` → `url` link of a forge item.
fn forge_url(obj: &Map<String, Value>) -> String {
    text_field(obj, &["html_url", "url"]).unwrap_or_default()
}

/// A tracker (Jira) issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerIssue {
    pub id: Option<String>,
    pub key: Option<String>,
    pub summary: String,
    pub description: String,
    pub url: String,
}

/// A forge (GitHub) issue or pull request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForgeIssue {
    pub id: Option<Value>,
    pub number: Option<Value>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub stargazers_count: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub sha: Option<String>,
    pub message: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub url: String,
}

/// A normalized record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRecord {
    TrackerIssue(TrackerIssue),
    ForgeIssue(ForgeIssue),
    Repository(Repository),
    Commit(Commit),
}

impl CanonicalRecord {
    pub fn bucket(&self) -> Bucket {
        match self {
            CanonicalRecord::TrackerIssue(_) => Bucket::JiraIssues,
            CanonicalRecord::ForgeIssue(_) => Bucket::GithubIssues,
            CanonicalRecord::Repository(_) => Bucket::GithubRepositories,
            CanonicalRecord::Commit(_) => Bucket::GithubCommits,
        }
    }

    /// The record as a JSON object.
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(obj)) => obj,
            _ => Map::new(),
        }
    }
}

/// Structured output buckets, keyed by provider and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    JiraIssues,
    GithubIssues,
    GithubRepositories,
    GithubCommits,
}

impl Bucket {
    pub fn key(self) -> &'static str {
        match self {
            Bucket::JiraIssues => "jira_issues",
            Bucket::GithubIssues => "github_issues",
            Bucket::GithubRepositories => "github_repositories",
            Bucket::GithubCommits => "github_commits",
        }
    }
}

// ==================== Tracker ====================

/// Keys that mark a bare object as an issue.
const ISSUE_MARKERS: &[&str] = &["key", "id", "issue_id", "fields", "summary"];

/// Tracker issues from any known search/get/create payload shape.
///
/// `browse_url` turns an issue key into a user-facing link.
pub fn tracker_issues_from_payload<F>(payload: &Value, browse_url: F) -> Vec<TrackerIssue>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = raw_tracker_issues(payload);
    raw.into_iter()
        .map(|obj| normalize_tracker_issue(obj, &browse_url))
        .collect()
}

/// Issues nested in `[ {issues: [...]}, ... ]` entries.
fn issues_of_entries(entries: &[Value]) -> Vec<&Map<String, Value>> {
    objects(entries)
        .filter_map(|entry| array_field(entry, "issues"))
        .flat_map(|issues| objects(issues))
        .collect()
}

fn raw_tracker_issues(payload: &Value) -> Vec<&Map<String, Value>> {
    match payload {
        // [ {total, issues: [...]} ]
        Value::Array(entries) => issues_of_entries(entries),
        Value::Object(obj) => {
            let mut found = Vec::new();
            // { items: [ {issues: [...]} ] }
            let wrapped = array_field(obj, "items");
            if let Some(items) = wrapped {
                found.extend(issues_of_entries(items));
            }
            if let Some(issues) = array_field(obj, "issues") {
                found.extend(objects(issues));
            } else if let Some(issue) = object_field(obj, "issue") {
                found.push(issue);
            } else if wrapped.is_none() && ISSUE_MARKERS.iter().any(|k| obj.contains_key(*k)) {
                found.push(obj);
            }
            found
        }
        _ => Vec::new(),
    }
}

fn normalize_tracker_issue<F>(raw: &Map<String, Value>, browse_url: &F) -> TrackerIssue
where
    F: Fn(&str) -> Option<String>,
{
    // create responses wrap the issue: { message, issue: {...} }
    let raw = object_field(raw, "issue").unwrap_or(raw);
    let empty = Map::new();
    let fields = object_field(raw, "fields").unwrap_or(&empty);

    let key = text_field(raw, &["key"]);
    let url = key
        .as_deref()
        .and_then(browse_url)
        .or_else(|| text_field(raw, &["self", "url"]))
        .unwrap_or_default();

    TrackerIssue {
        id: text_field(raw, &["id", "issue_id"]),
        summary: text_field(raw, &["summary"])
            .or_else(|| text_field(fields, &["summary"]))
            .unwrap_or_default(),
        description: text_field(raw, &["description"])
            .or_else(|| text_field(fields, &["description"]))
            .unwrap_or_default(),
        key,
        url,
    }
}

// ==================== Forge ====================

/// Which normalizer a forge tool's payload goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgeToolKind {
    Issues,
    Repositories,
    Commits,
    SingleCommit,
}

/// Lower-case name fragments identifying each forge tool kind.
const FORGE_TOOL_KINDS: &[(&str, ForgeToolKind)] = &[
    ("search_issues", ForgeToolKind::Issues),
    ("searchissues", ForgeToolKind::Issues),
    ("search_pull_requests", ForgeToolKind::Issues),
    ("searchpullrequests", ForgeToolKind::Issues),
    ("search_repositories", ForgeToolKind::Repositories),
    ("searchrepositories", ForgeToolKind::Repositories),
    ("list_commits", ForgeToolKind::Commits),
    ("listcommits", ForgeToolKind::Commits),
    ("get_commit", ForgeToolKind::SingleCommit),
    ("getcommit", ForgeToolKind::SingleCommit),
];

impl ForgeToolKind {
    pub fn from_tool_name(tool: &str) -> Option<Self> {
        let lower = tool.to_lowercase();
        FORGE_TOOL_KINDS
            .iter()
            .find(|(fragment, _)| lower.contains(fragment))
            .map(|(_, kind)| *kind)
    }
}

/// Items of a forge search payload: `{items: [...]}` or a bare list.
fn forge_search_items(payload: &Value) -> Vec<&Map<String, Value>> {
    match payload {
        Value::Object(obj) => array_field(obj, "items")
            .map(|items| objects(items).collect())
            .unwrap_or_default(),
        Value::Array(items) => objects(items).collect(),
        _ => Vec::new(),
    }
}

pub fn forge_issues_from_payload(payload: &Value) -> Vec<ForgeIssue> {
    forge_search_items(payload)
        .into_iter()
        .map(|it| ForgeIssue {
            id: it.get("id").cloned(),
            number: it.get("number").cloned(),
            title: it.get("title").and_then(Value::as_str).map(String::from),
            state: it.get("state").and_then(Value::as_str).map(String::from),
            url: forge_url(it),
        })
        .collect()
}

pub fn repositories_from_payload(payload: &Value) -> Vec<Repository> {
    forge_search_items(payload)
        .into_iter()
        .map(|it| Repository {
            id: it.get("id").cloned(),
            name: it.get("name").and_then(Value::as_str).map(String::from),
            full_name: it.get("full_name").and_then(Value::as_str).map(String::from),
            description: it.get("description").and_then(Value::as_str).map(String::from),
            url: forge_url(it),
            stargazers_count: it.get("stargazers_count").cloned(),
        })
        .collect()
}

/// Commits from a bare list or a `{commits|items|results: [...]}` wrapper.
pub fn commits_from_payload(payload: &Value) -> Vec<Commit> {
    let items: Vec<&Map<String, Value>> = match payload {
        Value::Array(items) => objects(items).collect(),
        Value::Object(obj) => ["commits", "items", "results"]
            .iter()
            .find_map(|k| array_field(obj, k))
            .map(|items| objects(items).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    items.into_iter().map(normalize_commit).collect()
}

/// A single commit object, as returned by get-commit tools.
pub fn single_commit_from_payload(payload: &Value) -> Vec<Commit> {
    payload
        .as_object()
        .map(|obj| vec![normalize_commit(obj)])
        .unwrap_or_default()
}

fn normalize_commit(it: &Map<String, Value>) -> Commit {
    let commit = object_field(it, "commit");
    let author = commit.and_then(|c| object_field(c, "author"));
    let str_of = |obj: Option<&Map<String, Value>>, key: &str| {
        obj.and_then(|o| o.get(key))
            .and_then(Value::as_str)
            .map(String::from)
    };

    Commit {
        sha: it.get("sha").and_then(Value::as_str).map(String::from),
        message: str_of(commit, "message"),
        author: str_of(author, "name"),
        date: str_of(author, "date"),
        url: forge_url(it),
    }
}
