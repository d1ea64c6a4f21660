//! Configuration validation issues.
//!
//! The loader checks provider settings once at startup and reports what it
//! finds as [`ConfigIssue`]s. Nothing here aborts: callers decide whether an
//! [`Severity::Error`] is fatal.

use super::settings::PlannerSettings;
use crate::intent::repo::RepoRef;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `repo_url` does not contain a `github.com/<owner>/<name>` pair.
    InvalidEnforcedRepoUrl,
    /// A `default_repos` entry is not `owner/name`; it will be ignored.
    MalformedDefaultRepo,
    /// GitHub has no token; its catalog will be empty.
    MissingGithubToken,
    /// Jira is missing url, username or api token; its catalog will be empty.
    MissingJiraCredentials,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl PlannerSettings {
    /// Check the repository settings.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(url) = &self.enforced_repo_url
            && RepoRef::from_url(url).is_none()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEnforcedRepoUrl,
                format!("github.repo_url '{}' is not a github.com/<owner>/<name> URL", url),
            ));
        }

        for entry in &self.default_repos {
            if RepoRef::parse(entry).is_none() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MalformedDefaultRepo,
                    format!("github.default_repos entry '{}' is not owner/name and will be ignored", entry),
                ));
            }
        }

        issues
    }
}
