//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; [`FileConfig::planner_settings`] turns
//! them into the domain's read-only [`PlannerSettings`].

mod github;
mod jira;

pub use github::FileGithubConfig;
pub use jira::{FileJiraConfig, JiraCredentials};

use serde::{Deserialize, Serialize};
use taskbridge_domain::{ConfigIssue, ConfigIssueCode, PlannerSettings};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// GitHub MCP server and repository scoping
    pub github: FileGithubConfig,
    /// Jira MCP server and issue filing
    pub jira: FileJiraConfig,
}

impl FileConfig {
    /// Settings consumed by planning, adaptation and aggregation.
    pub fn planner_settings(&self) -> PlannerSettings {
        let mut settings = PlannerSettings::new().with_default_repos_csv(&self.github.default_repos);
        if let Some(url) = &self.github.repo_url {
            settings = settings.with_enforced_repo_url(url.clone());
        }
        if let Some(key) = &self.jira.default_project_key {
            settings = settings.with_default_project_key(key.clone());
        }
        if let Some(url) = &self.jira.url {
            settings = settings.with_jira_base_url(url.clone());
        }
        settings
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Missing credentials are warnings: the provider's catalog is simply
    /// empty and its capabilities are skipped.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.github.token().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingGithubToken,
                "github.token is not set; GitHub tools will be unavailable",
            ));
        }

        if let Err(missing) = self.jira.credentials() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingJiraCredentials,
                format!(
                    "{} not set; Jira tools will be unavailable",
                    missing.join(", ")
                ),
            ));
        }

        issues.extend(self.planner_settings().validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskbridge_domain::{RepoRef, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[github]
token = "ghp_x"
default_repos = "acme/widgets, acme/gears"
repo_url = "https://github.com/acme/widgets"
read_only = true

[jira]
url = "https://acme.atlassian.net"
username = "ann@acme.io"
api_token = "secret"
verify_ssl = false
default_project_key = "OPS"
server_image = "ghcr.io/acme/jira-mcp:latest"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.token(), Some("ghp_x"));
        assert!(config.github.read_only);
        assert!(!config.jira.verify_ssl);
        assert_eq!(config.jira.server_image(), Some("ghcr.io/acme/jira-mcp:latest"));
        assert!(config.validate().is_empty());

        let settings = config.planner_settings();
        assert_eq!(settings.default_repos, vec!["acme/widgets", "acme/gears"]);
        assert_eq!(settings.enforced_repo(), Some(RepoRef::new("acme", "widgets")));
        assert_eq!(settings.default_project_key.as_deref(), Some("OPS"));
        assert_eq!(
            settings.browse_url("OPS-1").as_deref(),
            Some("https://acme.atlassian.net/browse/OPS-1")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[github]
token = "ghp_x"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.github.command, "npx");
        assert!(config.jira.verify_ssl);
        assert!(config.planner_settings().default_repos.is_empty());
    }

    #[test]
    fn test_default_config_warns_about_credentials() {
        let issues = FileConfig::default().validate();
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::MissingGithubToken,
                ConfigIssueCode::MissingJiraCredentials
            ]
        );
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(issues[1].message.contains("jira.url, jira.username, jira.api_token"));
    }

    #[test]
    fn test_validate_bad_repo_url_is_error() {
        let toml_str = r#"
[github]
token = "ghp_x"
repo_url = "https://gitlab.com/acme/widgets"

[jira]
url = "https://acme.atlassian.net"
username = "ann"
api_token = "secret"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidEnforcedRepoUrl);
        assert!(ConfigIssue::has_errors(&issues));
    }
}
