//! Keyword and filter extraction from raw user text.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::repo::{RepoRef, extract_repo_filters};
use super::rules::{
    COMMIT_REFERENCE_PHRASES, DEFAULT_KEYWORD, DIRECT_CREATE_PHRASES, MAX_KEYWORDS,
    MIN_KEYWORD_LEN, PROVIDER_PHRASE_RULES, ProviderScope, STOPWORDS, contains_any,
};
use crate::config::PlannerSettings;
use crate::tool::ProviderId;
use crate::util::truncate_chars;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9_\-]+").expect("valid regex"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title\s*[-:]\s*(.+?)(?:,|$)").expect("valid regex"));

static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)description\s*[-:]\s*(.+)$").expect("valid regex"));

static COMMIT_SHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-f]{7,40}\b").expect("valid regex"));

/// Summary length used when the message carries no explicit title.
const DEFAULT_SUMMARY_CHARS: usize = 100;

/// Search keywords: lower-cased word tokens minus stopwords and short words,
/// deduplicated in first-seen order, capped at [`MAX_KEYWORDS`].
///
/// Never empty; falls back to [`DEFAULT_KEYWORD`].
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for word in WORD.find_iter(&lower).map(|m| m.as_str()) {
        if word.chars().count() < MIN_KEYWORD_LEN || STOPWORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
    }

    if keywords.is_empty() {
        keywords.push(DEFAULT_KEYWORD.to_string());
    }
    keywords
}

/// Providers the user allows for this message.
pub fn allowed_providers(text: &str) -> BTreeSet<ProviderId> {
    let lower = text.to_lowercase();
    let mut allowed: BTreeSet<ProviderId> = ProviderId::ALL.into_iter().collect();

    for rule in PROVIDER_PHRASE_RULES {
        if !contains_any(&lower, rule.phrases) {
            continue;
        }
        match rule.scope {
            ProviderScope::Only => return BTreeSet::from([rule.provider]),
            ProviderScope::Exclude => {
                allowed.remove(&rule.provider);
            }
        }
    }
    allowed
}

/// Summary and description for an issue filed straight from the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectCreate {
    pub summary: String,
    pub description: String,
}

/// `Some` when the message explicitly asks to file an issue.
///
/// `title - X, description - Y` (or `:`) is honored; otherwise the summary is
/// the first 100 characters of the message and the description the whole
/// message.
pub fn detect_direct_create(text: &str) -> Option<DirectCreate> {
    if !contains_any(&text.to_lowercase(), DIRECT_CREATE_PHRASES) {
        return None;
    }

    let title = TITLE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty());
    let description = DESCRIPTION
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty());

    Some(DirectCreate {
        summary: title.unwrap_or_else(|| truncate_chars(text, DEFAULT_SUMMARY_CHARS).to_string()),
        description: description.unwrap_or_else(|| text.to_string()),
    })
}

/// The commit SHA when the message asks about one specific commit.
///
/// Requires both a 7-40 hex-char token and a commit-reference phrase.
pub fn detect_specific_commit(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if !contains_any(&lower, COMMIT_REFERENCE_PHRASES) {
        return None;
    }
    COMMIT_SHA.find(&lower).map(|m| m.as_str().to_string())
}

/// Everything the planner reads from one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentSignals {
    pub text_lower: String,
    pub keywords: Vec<String>,
    pub repos: Vec<RepoRef>,
    pub providers: BTreeSet<ProviderId>,
    pub direct_create: Option<DirectCreate>,
    pub specific_commit: Option<String>,
}

impl IntentSignals {
    pub fn extract(text: &str, settings: &PlannerSettings) -> Self {
        Self {
            text_lower: text.to_lowercase(),
            keywords: extract_keywords(text),
            repos: extract_repo_filters(text, settings),
            providers: allowed_providers(text),
            direct_create: detect_direct_create(text),
            specific_commit: detect_specific_commit(text),
        }
    }

    pub fn allows(&self, provider: ProviderId) -> bool {
        self.providers.contains(&provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_drop_stopwords_and_keep_order() {
        let kws = extract_keywords("Show me all the permission issues and bugs");
        assert_eq!(kws, vec!["permission", "bugs"]);
    }

    #[test]
    fn test_keywords_dedupe_and_cap() {
        let kws = extract_keywords("alpha beta alpha gamma delta epsilon zeta eta");
        assert_eq!(kws, vec!["alpha", "beta", "gamma", "delta", "epsilon"]);
    }

    #[test]
    fn test_keywords_default_when_empty() {
        assert_eq!(extract_keywords("show me all"), vec![DEFAULT_KEYWORD]);
    }

    #[test]
    fn test_keywords_keep_hyphen_and_underscore() {
        let kws = extract_keywords("login-page user_roles");
        assert_eq!(kws, vec!["login-page", "user_roles"]);
    }

    #[test]
    fn test_allowed_providers_default_is_both() {
        let p = allowed_providers("find bugs");
        assert_eq!(p, BTreeSet::from([ProviderId::Jira, ProviderId::Github]));
    }

    #[test]
    fn test_only_phrase_restricts() {
        assert_eq!(
            allowed_providers("bugs, consider only GitHub"),
            BTreeSet::from([ProviderId::Github])
        );
        assert_eq!(
            allowed_providers("jira only please"),
            BTreeSet::from([ProviderId::Jira])
        );
    }

    #[test]
    fn test_exclude_phrase_removes() {
        assert_eq!(
            allowed_providers("bugs without jira"),
            BTreeSet::from([ProviderId::Github])
        );
        assert!(allowed_providers("no jira and no github").is_empty());
    }

    #[test]
    fn test_only_wins_over_exclude() {
        assert_eq!(
            allowed_providers("only jira, no jira"),
            BTreeSet::from([ProviderId::Jira])
        );
    }

    #[test]
    fn test_direct_create_with_title_and_description() {
        let dc = detect_direct_create("create a bug title - Login fails, description - cannot log in")
            .unwrap();
        assert_eq!(dc.summary, "Login fails");
        assert_eq!(dc.description, "cannot log in");
    }

    #[test]
    fn test_direct_create_defaults() {
        let long = format!("please create a ticket {}", "x".repeat(200));
        let dc = detect_direct_create(&long).unwrap();
        assert_eq!(dc.summary.chars().count(), 100);
        assert_eq!(dc.description, long);
    }

    #[test]
    fn test_no_direct_create_without_phrase() {
        assert!(detect_direct_create("title - Login fails").is_none());
    }

    #[test]
    fn test_specific_commit_needs_sha_and_phrase() {
        assert_eq!(
            detect_specific_commit("show commit details for ABC1234F"),
            Some("abc1234f".to_string())
        );
        assert!(detect_specific_commit("show commit details").is_none());
        assert!(detect_specific_commit("what about abc1234f").is_none());
        assert!(detect_specific_commit("show commit abc12").is_none());
    }

    #[test]
    fn test_signals_extract() {
        let settings = PlannerSettings::default().with_default_repos_csv("acme/core");
        let s = IntentSignals::extract("list commits for repo:acme/widgets", &settings);
        assert_eq!(s.repos[0], RepoRef::new("acme", "widgets"));
        assert_eq!(s.repos.len(), 2);
        assert!(s.direct_create.is_none());
        assert!(s.specific_commit.is_none());
        assert!(s.allows(ProviderId::Github));
    }
}
