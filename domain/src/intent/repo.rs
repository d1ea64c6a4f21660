//! Repository references and repo-filter extraction.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config::PlannerSettings;

static REPO_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)repo:([\w.-]+/[\w.-]+)").expect("valid regex"));

static REPO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/([\w.-]+)/([\w.-]+)").expect("valid regex"));

/// An `owner/name` repository pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`. Both halves must be non-empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (owner, name) = s.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(owner, name))
    }

    /// Parse the owner/name pair out of a `github.com/<owner>/<name>` URL.
    pub fn from_url(url: &str) -> Option<Self> {
        let caps = REPO_URL.captures(url.trim())?;
        Some(Self::new(&caps[1], &caps[2]))
    }

    /// The `repo:owner/name` search qualifier.
    pub fn qualifier(&self) -> String {
        format!("repo:{}", self)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository filters for a message.
///
/// Order: `repo:owner/name` tokens from the text, then configured default
/// repositories, then the enforced repository URL. Duplicates are removed
/// case-insensitively, keeping the first occurrence.
pub fn extract_repo_filters(text: &str, settings: &PlannerSettings) -> Vec<RepoRef> {
    let from_text = REPO_TOKEN
        .captures_iter(text)
        .filter_map(|caps| RepoRef::parse(&caps[1]));
    let defaults = settings
        .default_repos
        .iter()
        .filter_map(|r| RepoRef::parse(r));
    let enforced = settings.enforced_repo();

    let mut seen = HashSet::new();
    from_text
        .chain(defaults)
        .chain(enforced)
        .filter(|r| seen.insert(r.to_string().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_name() {
        assert_eq!(RepoRef::parse("acme/widgets"), Some(RepoRef::new("acme", "widgets")));
        assert!(RepoRef::parse("acme").is_none());
        assert!(RepoRef::parse("/widgets").is_none());
    }

    #[test]
    fn test_from_url() {
        let repo = RepoRef::from_url("https://github.com/acme/widgets").unwrap();
        assert_eq!(repo, RepoRef::new("acme", "widgets"));
        assert_eq!(repo.qualifier(), "repo:acme/widgets");
        assert!(RepoRef::from_url("https://gitlab.com/acme/widgets").is_none());
    }

    #[test]
    fn test_text_tokens_come_first() {
        let settings = PlannerSettings::default()
            .with_default_repos_csv("base/core, other/lib")
            .with_enforced_repo_url("https://github.com/pinned/app");

        let repos = extract_repo_filters("check repo:Team/Service please", &settings);
        let names: Vec<String> = repos.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["Team/Service", "base/core", "other/lib", "pinned/app"]);
    }

    #[test]
    fn test_dedupe_is_case_insensitive() {
        let settings = PlannerSettings::default().with_default_repos_csv("acme/widgets");
        let repos = extract_repo_filters("repo:ACME/Widgets and repo:acme/widgets", &settings);
        assert_eq!(repos, vec![RepoRef::new("ACME", "Widgets")]);
    }

    #[test]
    fn test_repo_token_is_case_insensitive() {
        let repos = extract_repo_filters("REPO:acme/widgets", &PlannerSettings::default());
        assert_eq!(repos, vec![RepoRef::new("acme", "widgets")]);
    }

    #[test]
    fn test_no_repos() {
        assert!(extract_repo_filters("list commits", &PlannerSettings::default()).is_empty());
    }
}
