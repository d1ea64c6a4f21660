//! Capability → tool name resolution.
//!
//! Providers name their tools inconsistently (`search_issues`,
//! `jira_search_issues`, `searchIssues`, ...). Each abstract [`Capability`]
//! carries a row in [`CAPABILITY_RULES`] with preferred names and required
//! tokens; [`resolve_tool`] walks a provider's catalog with that row.

use super::entities::{ProviderId, ToolCatalog, ToolDescriptor};
use serde::Serialize;

/// An abstract operation the planner may want from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// File a new tracker issue
    CreateIssue,
    /// Search tracker issues with a JQL filter
    SearchTrackerIssues,
    /// Search forge issues and pull requests
    SearchForgeIssues,
    /// Search forge pull requests (fallback when no issue search exists)
    SearchPullRequests,
    /// Search forge repositories
    SearchRepositories,
    /// List a repository's commit history
    ListCommits,
    /// Fetch a single commit by reference
    GetCommit,
}

/// One row of the resolution table.
#[derive(Debug)]
pub struct CapabilityRule {
    pub capability: Capability,
    pub provider: ProviderId,
    /// Exact names tried first (case-insensitive)
    pub preferred: &'static [&'static str],
    /// Tokens that must all appear in the tool's name/description
    pub tokens: &'static [&'static str],
}

pub const CAPABILITY_RULES: &[CapabilityRule] = &[
    CapabilityRule {
        capability: Capability::CreateIssue,
        provider: ProviderId::Jira,
        preferred: &["jira_create_issue", "create_issue", "createIssue"],
        tokens: &["create", "issue"],
    },
    CapabilityRule {
        capability: Capability::SearchTrackerIssues,
        provider: ProviderId::Jira,
        preferred: &[
            "search_issues",
            "searchIssues",
            "issues_search",
            "jira_search_issues",
        ],
        tokens: &["search", "issue"],
    },
    CapabilityRule {
        capability: Capability::SearchForgeIssues,
        provider: ProviderId::Github,
        preferred: &["search_issues", "searchIssues"],
        tokens: &["search", "issue"],
    },
    CapabilityRule {
        capability: Capability::SearchPullRequests,
        provider: ProviderId::Github,
        preferred: &["search_pull_requests", "searchPullRequests"],
        tokens: &["search", "pull"],
    },
    CapabilityRule {
        capability: Capability::SearchRepositories,
        provider: ProviderId::Github,
        preferred: &["search_repositories", "searchRepositories"],
        tokens: &["search", "repo"],
    },
    CapabilityRule {
        capability: Capability::ListCommits,
        provider: ProviderId::Github,
        preferred: &["list_commits", "listCommits"],
        tokens: &["commit"],
    },
    CapabilityRule {
        capability: Capability::GetCommit,
        provider: ProviderId::Github,
        preferred: &["get_commit", "getCommit"],
        tokens: &["commit"],
    },
];

/// Conventional tool name used when no create tool can be resolved.
pub const FALLBACK_CREATE_TOOL: &str = "jira_create_issue";

impl Capability {
    /// The resolution row for this capability.
    ///
    /// `CAPABILITY_RULES` is laid out in variant order.
    pub fn rule(self) -> &'static CapabilityRule {
        &CAPABILITY_RULES[self as usize]
    }

    pub fn provider(self) -> ProviderId {
        self.rule().provider
    }

    /// Resolve this capability against the provider's catalog.
    pub fn resolve(self, catalog: &ToolCatalog) -> Option<&ToolDescriptor> {
        let rule = self.rule();
        resolve_tool(catalog.tools(rule.provider), rule.preferred, rule.tokens)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Capability::CreateIssue => "create issue",
            Capability::SearchTrackerIssues => "search tracker issues",
            Capability::SearchForgeIssues => "search issues/PRs",
            Capability::SearchPullRequests => "search pull requests",
            Capability::SearchRepositories => "search repositories",
            Capability::ListCommits => "list commits",
            Capability::GetCommit => "get commit",
        };
        write!(f, "{}", s)
    }
}

/// Pick a tool from a catalog.
///
/// 1. case-insensitive exact match against `preferred`
/// 2. first tool whose lower-cased name + description contains every token
/// 3. first tool whose lower-cased name alone contains every token
///
/// Steps 2 and 3 are skipped when `tokens` is empty.
pub fn resolve_tool<'a>(
    tools: &'a [ToolDescriptor],
    preferred: &[&str],
    tokens: &[&str],
) -> Option<&'a ToolDescriptor> {
    for name in preferred {
        if let Some(tool) = tools.iter().find(|t| t.name.eq_ignore_ascii_case(name)) {
            return Some(tool);
        }
    }

    if tokens.is_empty() {
        return None;
    }

    let contains_all = |haystack: &str| tokens.iter().all(|tok| haystack.contains(tok));

    tools
        .iter()
        .find(|t| contains_all(&t.search_text()))
        .or_else(|| tools.iter().find(|t| contains_all(&t.name.to_lowercase())))
}
