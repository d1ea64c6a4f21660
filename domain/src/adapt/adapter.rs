//! Logical arguments → the concrete keys a tool's schema expects.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::rules::{KeyRule, camel_to_snake, key_rules, snake_to_camel};
use crate::config::PlannerSettings;
use crate::intent::RepoRef;
use crate::plan::{LogicalArgs, Task};
use crate::tool::{ProviderId, ToolDescriptor};

/// Case-insensitive view of a tool's declared schema properties.
struct SchemaKeys<'a> {
    by_lower: HashMap<String, &'a str>,
    exact: HashSet<&'a str>,
}

impl<'a> SchemaKeys<'a> {
    fn new(descriptor: Option<&'a ToolDescriptor>) -> Self {
        let props = descriptor.map(|d| d.schema_properties.as_slice()).unwrap_or(&[]);
        Self {
            by_lower: props
                .iter()
                .map(|p| (p.to_lowercase(), p.as_str()))
                .collect(),
            exact: props.iter().map(String::as_str).collect(),
        }
    }

    fn is_known(&self) -> bool {
        !self.exact.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<&'a str> {
        self.by_lower.get(&key.to_lowercase()).copied()
    }

    fn choose(&self, rule: &KeyRule) -> String {
        rule.candidates
            .iter()
            .find_map(|c| self.lookup(c))
            .unwrap_or(rule.default)
            .to_string()
    }

    /// Schema key for a key no rule covers.
    ///
    /// Exact (case-insensitive) match first, then the other of
    /// snake_case / camelCase when only that form is declared.
    fn passthrough(&self, key: &str) -> String {
        if let Some(k) = self.lookup(key) {
            return k.to_string();
        }
        if self.is_known() {
            let alternate = if key.contains('_') {
                snake_to_camel(key)
            } else {
                camel_to_snake(key)
            };
            if let Some(k) = self.lookup(&alternate) {
                return k.to_string();
            }
        }
        key.to_string()
    }
}

/// Translates a task's logical arguments at call time.
///
/// Holds the enforced repository (if any); every GitHub call is scoped to it
/// regardless of what the planner asked for.
#[derive(Debug, Clone, Default)]
pub struct ArgumentAdapter {
    enforced_repo: Option<RepoRef>,
}

impl ArgumentAdapter {
    pub fn new(settings: &PlannerSettings) -> Self {
        Self {
            enforced_repo: settings.enforced_repo(),
        }
    }

    pub fn with_enforced_repo(mut self, repo: RepoRef) -> Self {
        self.enforced_repo = Some(repo);
        self
    }

    pub fn adapt_task(&self, task: &Task) -> Map<String, Value> {
        self.adapt(task.provider, task.descriptor.as_ref(), &task.args)
    }

    pub fn adapt(
        &self,
        provider: ProviderId,
        descriptor: Option<&ToolDescriptor>,
        logical: &LogicalArgs,
    ) -> Map<String, Value> {
        let schema = SchemaKeys::new(descriptor);
        let rules = key_rules(provider);
        let mut args = Map::new();
        let mut consumed: HashSet<&str> = HashSet::new();

        for rule in rules {
            let key = schema.choose(rule);
            let value = match logical.get(rule.logical) {
                Some(v) => Some(v),
                None => rule.fallback_from.and_then(|fb| logical.get(fb)),
            };
            consumed.insert(rule.logical);
            if let Some(fb) = rule.fallback_from {
                consumed.insert(fb);
            }
            if let Some(v) = value {
                args.insert(key, v.clone());
            }
        }

        for (key, value) in logical {
            if consumed.contains(key.as_str()) {
                continue;
            }
            args.entry(schema.passthrough(key))
                .or_insert_with(|| value.clone());
        }

        if provider == ProviderId::Github
            && let Some(repo) = &self.enforced_repo
        {
            enforce_repo(&mut args, &schema, rules, repo);
        }

        if schema.is_known() {
            args.retain(|k, _| schema.exact.contains(k.as_str()));
        }
        args
    }
}

fn rule_key(schema: &SchemaKeys<'_>, rules: &[KeyRule], logical: &str) -> String {
    rules
        .iter()
        .find(|r| r.logical == logical)
        .map(|r| schema.choose(r))
        .unwrap_or_else(|| logical.to_string())
}

/// Force owner/repo and prefix the free-text query with `repo:owner/name`.
fn enforce_repo(args: &mut Map<String, Value>, schema: &SchemaKeys<'_>, rules: &[KeyRule], repo: &RepoRef) {
    let query_key = rule_key(schema, rules, "query");
    if let Some(Value::String(query)) = args.get_mut(&query_key) {
        let token = repo.qualifier();
        if !query.contains(&token) {
            *query = format!("{} {}", token, query).trim().to_string();
        }
    }
    args.insert(rule_key(schema, rules, "owner"), Value::String(repo.owner.clone()));
    args.insert(rule_key(schema, rules, "repo"), Value::String(repo.name.clone()));
}
