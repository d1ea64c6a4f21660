//! Heuristic planner: message + catalog → ordered tasks.
//!
//! Planning is pure and synchronous. Branches run in a fixed order and each
//! is gated by the provider allow-list and by whether the catalog offers a
//! tool for its capability:
//!
//! 1. direct create (short-circuits everything else)
//! 2. tracker issue search
//! 3. forge issue / pull request search
//! 4. forge repository search
//! 5. commit history
//! 6. single commit lookup

use serde_json::json;

use super::entities::{LogicalArgs, Plan, Task, logical_args};
use crate::config::PlannerSettings;
use crate::intent::rules::{ALL_TASKS_JQL, Intent};
use crate::intent::{DirectCreate, IntentSignals, RepoRef};
use crate::tool::{Capability, FALLBACK_CREATE_TOOL, ProviderId, ToolCatalog, ToolDescriptor};

/// Page size requested from every search/list tool.
pub const RESULT_LIMIT: u64 = 30;

/// Issue type used for directly filed issues.
pub const DIRECT_CREATE_ISSUE_TYPE: &str = "Bug";

/// Qualifier appended to forge issue searches.
const MERGED_PR_QUALIFIER: &str = "is:pr is:merged sort:updated-desc";

/// Repository query when the message has no usable keywords.
const DEFAULT_REPO_QUERY: &str = "stars:>1";

pub struct Planner<'a> {
    catalog: &'a ToolCatalog,
    settings: &'a PlannerSettings,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a ToolCatalog, settings: &'a PlannerSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn plan(&self, text: &str) -> Plan {
        let signals = IntentSignals::extract(text, self.settings);
        self.plan_signals(&signals)
    }

    /// Plan from already-extracted signals.
    pub fn plan_signals(&self, signals: &IntentSignals) -> Plan {
        let mut plan = Plan::default();

        if signals.allows(ProviderId::Jira)
            && let Some(create) = &signals.direct_create
        {
            plan.tasks.push(self.direct_create_task(create, &mut plan.unresolved));
            return plan;
        }

        if signals.allows(ProviderId::Jira) {
            let jql = tracker_jql(&signals.text_lower, &signals.keywords);
            if let Some(tool) = self.resolve(Capability::SearchTrackerIssues, &mut plan) {
                plan.tasks.push(Task::bound(
                    ProviderId::Jira,
                    tool,
                    logical_args([("jql", json!(jql)), ("maxResults", json!(RESULT_LIMIT))]),
                ));
            }
        }

        if !signals.allows(ProviderId::Github) {
            return plan;
        }

        if Intent::IssuesOrPullRequests.matches(&signals.text_lower)
            && let Some(tool) = self.resolve_forge_search(&mut plan)
        {
            let query = forge_issue_query(&signals.repos, &signals.keywords);
            plan.tasks.push(Task::bound(
                ProviderId::Github,
                tool,
                logical_args([("query", json!(query)), ("perPage", json!(RESULT_LIMIT))]),
            ));
        }

        if Intent::Repositories.matches(&signals.text_lower)
            && let Some(tool) = self.resolve(Capability::SearchRepositories, &mut plan)
        {
            plan.tasks.push(Task::bound(
                ProviderId::Github,
                tool,
                logical_args([
                    ("query", json!(repository_query(&signals.keywords))),
                    ("perPage", json!(RESULT_LIMIT)),
                ]),
            ));
        }

        if Intent::CommitHistory.matches(&signals.text_lower)
            && signals.specific_commit.is_none()
            && let Some(tool) = self.resolve(Capability::ListCommits, &mut plan)
            && let Some(repo) = signals.repos.first()
        {
            let mut args = repo_args(repo);
            args.insert("perPage".into(), json!(RESULT_LIMIT));
            plan.tasks.push(Task::bound(ProviderId::Github, tool, args));
        }

        if let Some(sha) = &signals.specific_commit
            && let Some(tool) = self.resolve(Capability::GetCommit, &mut plan)
            && let Some(repo) = signals.repos.first()
        {
            let mut args = repo_args(repo);
            args.insert("ref".into(), json!(sha));
            plan.tasks.push(Task::bound(ProviderId::Github, tool, args));
        }

        plan
    }

    /// Resolve a capability, recording it as unresolved on a miss.
    fn resolve(&self, capability: Capability, plan: &mut Plan) -> Option<&'a ToolDescriptor> {
        let found = capability.resolve(self.catalog);
        if found.is_none() {
            plan.unresolved.push(capability);
        }
        found
    }

    /// Issue search first, pull-request search as the fallback.
    fn resolve_forge_search(&self, plan: &mut Plan) -> Option<&'a ToolDescriptor> {
        Capability::SearchForgeIssues
            .resolve(self.catalog)
            .or_else(|| self.resolve(Capability::SearchPullRequests, plan))
    }

    fn direct_create_task(
        &self,
        create: &DirectCreate,
        unresolved: &mut Vec<Capability>,
    ) -> Task {
        let mut args = LogicalArgs::new();
        if let Some(key) = &self.settings.default_project_key {
            args.insert("project_key".into(), json!(key));
        }
        args.insert("summary".into(), json!(create.summary));
        args.insert("description".into(), json!(create.description));
        args.insert("issue_type".into(), json!(DIRECT_CREATE_ISSUE_TYPE));

        match Capability::CreateIssue.resolve(self.catalog) {
            Some(tool) => Task::bound(ProviderId::Jira, tool, args),
            None => {
                unresolved.push(Capability::CreateIssue);
                Task::unbound(ProviderId::Jira, FALLBACK_CREATE_TOOL, args)
            }
        }
    }
}

/// JQL for a tracker search, ordered by last update.
pub fn tracker_jql(text_lower: &str, keywords: &[String]) -> String {
    let broad = text_lower.contains("all tasks")
        || (text_lower.contains("tasks") && keywords.len() <= 2);

    let filter = if broad {
        ALL_TASKS_JQL.to_string()
    } else {
        keywords
            .iter()
            .map(|kw| format!(r#"(summary ~ "{kw}" OR description ~ "{kw}")"#))
            .collect::<Vec<_>>()
            .join(" OR ")
    };
    format!("({}) ORDER BY updated DESC", filter)
}

/// `repo:a/b repo:c/d is:pr is:merged sort:updated-desc kw1 kw2`
pub fn forge_issue_query(repos: &[RepoRef], keywords: &[String]) -> String {
    let mut query = String::new();
    for repo in repos {
        query.push_str(&repo.qualifier());
        query.push(' ');
    }
    query.push_str(MERGED_PR_QUALIFIER);
    query.push(' ');
    query.push_str(&keywords.join(" "));
    query
}

fn repository_query(keywords: &[String]) -> String {
    let joined = keywords.join(" ");
    if joined.is_empty() {
        DEFAULT_REPO_QUERY.to_string()
    } else {
        joined
    }
}

fn repo_args(repo: &RepoRef) -> LogicalArgs {
    logical_args([("owner", json!(repo.owner)), ("repo", json!(repo.name))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ProviderCatalog;

    fn full_catalog() -> ToolCatalog {
        ToolCatalog::new()
            .with(ProviderCatalog::new(
                ProviderId::Jira,
                vec![
                    ToolDescriptor::new("jira_create_issue", "Create a Jira issue"),
                    ToolDescriptor::new("search_issues", "Search issues with JQL"),
                ],
            ))
            .with(ProviderCatalog::new(
                ProviderId::Github,
                vec![
                    ToolDescriptor::new("search_issues", "Search issues and PRs"),
                    ToolDescriptor::new("search_repositories", "Search repositories"),
                    ToolDescriptor::new("list_commits", "List commits"),
                    ToolDescriptor::new("get_commit", "Get a commit"),
                ],
            ))
    }

    fn plan(text: &str) -> Plan {
        let catalog = full_catalog();
        let settings = PlannerSettings::default();
        Planner::new(&catalog, &settings).plan(text)
    }

    fn tools(plan: &Plan) -> Vec<String> {
        plan.tasks.iter().map(|t| t.label()).collect()
    }

    #[test]
    fn test_direct_create_plans_single_task() {
        let plan = plan("create a bug title - Login fails, description - cannot log in");
        assert_eq!(plan.len(), 1);
        let task = &plan.tasks[0];
        assert_eq!(task.label(), "jira.jira_create_issue");
        assert_eq!(
            serde_json::Value::Object(task.args.clone()),
            json!({"summary": "Login fails", "description": "cannot log in", "issue_type": "Bug"})
        );
    }

    #[test]
    fn test_direct_create_includes_configured_project() {
        let catalog = full_catalog();
        let settings = PlannerSettings::default().with_default_project_key("OPS");
        let plan = Planner::new(&catalog, &settings).plan("please file a bug about login");
        assert_eq!(plan.tasks[0].args.get("project_key"), Some(&json!("OPS")));
    }

    #[test]
    fn test_direct_create_falls_back_to_conventional_name() {
        let catalog = ToolCatalog::new();
        let settings = PlannerSettings::default();
        let plan = Planner::new(&catalog, &settings).plan("create an issue for the crash");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.tasks[0].tool, FALLBACK_CREATE_TOOL);
        assert!(plan.tasks[0].descriptor.is_none());
        assert_eq!(plan.unresolved, vec![Capability::CreateIssue]);
    }

    #[test]
    fn test_direct_create_skipped_when_jira_excluded() {
        let plan = plan("create a bug without jira");
        assert!(plan.tasks.iter().all(|t| t.provider == ProviderId::Github));
    }

    #[test]
    fn test_keyword_jql() {
        let plan = plan("login timeout errors in checkout");
        let task = &plan.tasks[0];
        assert_eq!(task.label(), "jira.search_issues");
        assert_eq!(
            task.args.get("jql"),
            Some(&json!(
                r#"((summary ~ "login" OR description ~ "login") OR (summary ~ "timeout" OR description ~ "timeout") OR (summary ~ "errors" OR description ~ "errors") OR (summary ~ "checkout" OR description ~ "checkout")) ORDER BY updated DESC"#
            ))
        );
        assert_eq!(task.args.get("maxResults"), Some(&json!(30)));
    }

    #[test]
    fn test_all_tasks_jql() {
        assert_eq!(
            tracker_jql("show all tasks", &["permission".to_string()]),
            r#"(issuetype in ("Task","Story","Bug","Epic")) ORDER BY updated DESC"#
        );
        let many: Vec<String> = ["a1", "b2", "c3"].iter().map(|s| s.to_string()).collect();
        assert!(tracker_jql("tasks for alpha beta gamma", &many).contains("summary ~"));
    }

    #[test]
    fn test_forge_issue_search() {
        let plan = plan("merged pull requests about caching in repo:acme/widgets");
        let task = plan
            .tasks
            .iter()
            .find(|t| t.provider == ProviderId::Github)
            .unwrap();
        assert_eq!(task.tool, "search_issues");
        assert_eq!(
            task.args.get("query"),
            Some(&json!(
                "repo:acme/widgets is:pr is:merged sort:updated-desc merged caching repo acme widgets"
            ))
        );
        assert_eq!(task.args.get("perPage"), Some(&json!(30)));
    }

    #[test]
    fn test_forge_search_falls_back_to_pull_requests() {
        let catalog = ToolCatalog::new().with(ProviderCatalog::new(
            ProviderId::Github,
            vec![ToolDescriptor::new("search_pull_requests", "")],
        ));
        let settings = PlannerSettings::default();
        let plan = Planner::new(&catalog, &settings).plan("open pull requests only github");
        assert_eq!(tools(&plan), vec!["github.search_pull_requests"]);
    }

    #[test]
    fn test_repository_search() {
        let plan = plan("list repos only github");
        assert_eq!(tools(&plan), vec!["github.search_repositories"]);
        assert_eq!(plan.tasks[0].args.get("query"), Some(&json!("repos only github")));
    }

    #[test]
    fn test_commit_history() {
        let plan = plan("list commits for repo:acme/widgets");
        let task = plan
            .tasks
            .iter()
            .find(|t| t.tool == "list_commits")
            .unwrap();
        assert_eq!(task.args.get("owner"), Some(&json!("acme")));
        assert_eq!(task.args.get("repo"), Some(&json!("widgets")));
        assert_eq!(task.args.get("perPage"), Some(&json!(30)));
        assert!(plan.tasks.iter().all(|t| t.tool != "get_commit"));
    }

    #[test]
    fn test_specific_commit_suppresses_history() {
        let plan = plan("show commit details for 9fceb02d in repo:acme/widgets history");
        assert!(plan.tasks.iter().all(|t| t.tool != "list_commits"));
        let task = plan.tasks.iter().find(|t| t.tool == "get_commit").unwrap();
        assert_eq!(task.args.get("owner"), Some(&json!("acme")));
        assert_eq!(task.args.get("repo"), Some(&json!("widgets")));
        assert_eq!(task.args.get("ref"), Some(&json!("9fceb02d")));
    }

    #[test]
    fn test_commit_history_needs_repo() {
        let plan = plan("list commits only github");
        assert!(plan.is_empty());
    }

    #[test]
    fn test_empty_catalog_records_unresolved() {
        let catalog = ToolCatalog::new();
        let settings = PlannerSettings::default();
        let plan = Planner::new(&catalog, &settings).plan("list repos and issues");
        assert!(plan.is_empty());
        assert!(plan.unresolved.contains(&Capability::SearchTrackerIssues));
        assert!(plan.unresolved.contains(&Capability::SearchPullRequests));
        assert!(plan.unresolved.contains(&Capability::SearchRepositories));
        assert!(!plan.unresolved.contains(&Capability::ListCommits));
    }

    #[test]
    fn test_only_jira_skips_github_branches() {
        let plan = plan("issues in repo:acme/widgets only jira");
        assert_eq!(tools(&plan), vec!["jira.search_issues"]);
    }
}
