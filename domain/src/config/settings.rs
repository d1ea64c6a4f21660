//! Planner settings value object

use crate::intent::repo::RepoRef;

/// Read-only configuration consumed by planning, adaptation and aggregation.
///
/// Built by the infrastructure config loader; the domain never reads files
/// or the environment itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerSettings {
    /// Raw `owner/name` entries from the comma-separated default repo list
    pub default_repos: Vec<String>,
    /// Single repository every GitHub call is forced into
    pub enforced_repo_url: Option<String>,
    /// Jira project used when filing issues directly
    pub default_project_key: Option<String>,
    /// Jira base URL, used to build `/browse/<key>` links
    pub jira_base_url: Option<String>,
}

impl PlannerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a comma-separated repo list, dropping blank entries.
    pub fn with_default_repos_csv(mut self, csv: &str) -> Self {
        self.default_repos = split_csv(csv);
        self
    }

    pub fn with_enforced_repo_url(mut self, url: impl Into<String>) -> Self {
        self.enforced_repo_url = Some(url.into()).filter(|u: &String| !u.trim().is_empty());
        self
    }

    pub fn with_default_project_key(mut self, key: impl Into<String>) -> Self {
        self.default_project_key = Some(key.into()).filter(|k: &String| !k.trim().is_empty());
        self
    }

    pub fn with_jira_base_url(mut self, url: impl Into<String>) -> Self {
        self.jira_base_url = Some(url.into()).filter(|u: &String| !u.trim().is_empty());
        self
    }

    /// The enforced repository, if the configured URL parses.
    pub fn enforced_repo(&self) -> Option<RepoRef> {
        self.enforced_repo_url
            .as_deref()
            .and_then(RepoRef::from_url)
    }

    /// `<jira_base_url>/browse/<key>`, when a base URL is configured.
    pub fn browse_url(&self, key: &str) -> Option<String> {
        let base = self.jira_base_url.as_deref()?.trim_end_matches('/');
        Some(format!("{}/browse/{}", base, key))
    }
}

/// Split a comma-separated list into trimmed, non-empty entries.
pub fn split_csv(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
