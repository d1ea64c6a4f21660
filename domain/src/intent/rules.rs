//! Phrase tables driving intent classification.
//!
//! Every heuristic the planner applies to raw text lives here as a row in a
//! `const` table. Matching is always a lower-case substring test.

use crate::tool::ProviderId;

/// Any of these means the message may need tool data.
pub const TRIGGER_TERMS: &[&str] = &[
    "jira",
    "github",
    "issue",
    "issues",
    "task",
    "tasks",
    "ticket",
    "pull request",
    "pr",
    "permission",
    "history",
    "story",
    "stories",
    "epic",
    "epics",
    "feature",
    "features",
    "bug",
    "bugs",
    "problem",
    "problems",
    "error",
    "errors",
    "help",
    "need",
    "needs",
    "want",
    "wants",
    "commit",
    "commits",
    "repository",
    "repositories",
    "repo",
    "repos",
    "commit history",
];

/// Words never used as search keywords.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "on", "in", "for", "of", "with", "about", "all", "give",
    "show", "list", "get", "me", "my", "please", "could", "would", "find", "fetch", "retrieve",
    "past", "history", "issue", "issues", "pr", "pull", "request", "requests", "related", "know",
    "want",
];

/// Fallback keyword when nothing survives filtering.
pub const DEFAULT_KEYWORD: &str = "permission";

/// Maximum number of keywords carried into queries.
pub const MAX_KEYWORDS: usize = 5;

/// Minimum keyword length, in characters.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Explicit requests to file a tracker issue right away.
pub const DIRECT_CREATE_PHRASES: &[&str] = &[
    "create a bug",
    "create bug",
    "create jira bug",
    "create jira ticket",
    "create ticket in jira",
    "create a ticket",
    "create ticket",
    "open a bug",
    "open bug in jira",
    "open a ticket",
    "file a bug",
    "report a bug",
    "create issue",
    "create an issue",
    "raise a bug",
];

/// Phrases that point at one particular commit.
pub const COMMIT_REFERENCE_PHRASES: &[&str] = &[
    "this commit",
    "that commit",
    "the commit",
    "show commit",
    "get commit",
    "view commit",
    "open commit",
    "commit details",
    "details for commit",
    "details of commit",
    "what changed in commit",
    "changes in commit",
];

/// Plan branches gated on wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Forge issue / pull request search
    IssuesOrPullRequests,
    /// Forge repository search
    Repositories,
    /// Commit history for a repository
    CommitHistory,
}

#[derive(Debug)]
pub struct IntentRule {
    pub intent: Intent,
    pub phrases: &'static [&'static str],
}

pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::IssuesOrPullRequests,
        phrases: &["issue", "issues", "pr", "pull request", "pull requests"],
    },
    IntentRule {
        intent: Intent::Repositories,
        phrases: &["repositories", "repos", "list repos"],
    },
    IntentRule {
        intent: Intent::CommitHistory,
        phrases: &["commits", "commit history", "history"],
    },
];

/// How a provider phrase changes the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderScope {
    /// Keep only this provider
    Only,
    /// Drop this provider
    Exclude,
}

#[derive(Debug)]
pub struct ProviderPhraseRule {
    pub provider: ProviderId,
    pub scope: ProviderScope,
    pub phrases: &'static [&'static str],
}

/// `Only` rows come first: an exclusive phrase settles the allow-list
/// before any exclusion is looked at.
pub const PROVIDER_PHRASE_RULES: &[ProviderPhraseRule] = &[
    ProviderPhraseRule {
        provider: ProviderId::Jira,
        scope: ProviderScope::Only,
        phrases: &["only jira", "consider only jira", "jira only"],
    },
    ProviderPhraseRule {
        provider: ProviderId::Github,
        scope: ProviderScope::Only,
        phrases: &["only github", "consider only github", "github only"],
    },
    ProviderPhraseRule {
        provider: ProviderId::Jira,
        scope: ProviderScope::Exclude,
        phrases: &["no jira", "without jira", "ignore jira"],
    },
    ProviderPhraseRule {
        provider: ProviderId::Github,
        scope: ProviderScope::Exclude,
        phrases: &["no github", "without github", "ignore github"],
    },
];

/// Tracker filter used for broad "all tasks" requests.
pub const ALL_TASKS_JQL: &str = r#"issuetype in ("Task","Story","Bug","Epic")"#;

/// Whether any phrase occurs in already lower-cased text.
pub fn contains_any(text_lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text_lower.contains(p))
}

impl Intent {
    pub fn rule(self) -> &'static IntentRule {
        &INTENT_RULES[self as usize]
    }

    pub fn matches(self, text_lower: &str) -> bool {
        contains_any(text_lower, self.rule().phrases)
    }
}
