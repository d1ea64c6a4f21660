//! Per-provider key alias tables.

use crate::tool::ProviderId;

/// Maps one logical argument onto whichever schema key the tool declares.
#[derive(Debug)]
pub struct KeyRule {
    /// Key the planner uses
    pub logical: &'static str,
    /// Schema names tried in order (case-insensitive)
    pub candidates: &'static [&'static str],
    /// Key used when the schema declares none of the candidates
    pub default: &'static str,
    /// Logical key read when `logical` itself is absent
    pub fallback_from: Option<&'static str>,
}

const fn rule(
    logical: &'static str,
    candidates: &'static [&'static str],
) -> KeyRule {
    KeyRule {
        logical,
        candidates,
        default: logical,
        fallback_from: None,
    }
}

const fn limit_rule(
    logical: &'static str,
    candidates: &'static [&'static str],
) -> KeyRule {
    KeyRule {
        logical,
        candidates,
        default: logical,
        fallback_from: Some("limit"),
    }
}

pub const JIRA_KEY_RULES: &[KeyRule] = &[
    rule("jql", &["jql", "query", "jqlQuery"]),
    limit_rule("maxResults", &["maxResults", "max_results", "limit"]),
];

pub const GITHUB_KEY_RULES: &[KeyRule] = &[
    rule("query", &["query", "q"]),
    limit_rule("perPage", &["perPage", "per_page", "limit"]),
    rule("owner", &["owner", "user", "org"]),
    rule("repo", &["repo", "repository"]),
    rule("sha", &["sha", "start_sha"]),
    rule("ref", &["ref", "sha", "commit"]),
    rule("path", &["path", "filePath"]),
    rule("order", &["order", "direction"]),
    rule("sort", &["sort"]),
    rule("page", &["page"]),
];

pub fn key_rules(provider: ProviderId) -> &'static [KeyRule] {
    match provider {
        ProviderId::Jira => JIRA_KEY_RULES,
        ProviderId::Github => GITHUB_KEY_RULES,
    }
}

/// `project_key` → `projectKey`
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `issueType` → `issue_type`
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversion() {
        assert_eq!(snake_to_camel("project_key"), "projectKey");
        assert_eq!(snake_to_camel("issue_type"), "issueType");
        assert_eq!(snake_to_camel("summary"), "summary");
        assert_eq!(camel_to_snake("projectKey"), "project_key");
        assert_eq!(camel_to_snake("issueType"), "issue_type");
    }

    #[test]
    fn test_limit_fallback_rules() {
        let with_fallback: Vec<_> = GITHUB_KEY_RULES
            .iter()
            .chain(JIRA_KEY_RULES)
            .filter(|r| r.fallback_from.is_some())
            .map(|r| r.logical)
            .collect();
        assert_eq!(with_fallback, vec!["perPage", "maxResults"]);
    }
}
