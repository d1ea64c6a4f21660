//! Tool catalog entities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A remote tool source.
///
/// Each provider is an MCP server exposing its own catalog of tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Issue tracker (Jira)
    Jira,
    /// Source forge (GitHub)
    Github,
}

impl ProviderId {
    /// Every known provider, in discovery order.
    pub const ALL: [ProviderId; 2] = [ProviderId::Jira, ProviderId::Github];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Jira => "jira",
            ProviderId::Github => "github",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jira" => Ok(ProviderId::Jira),
            "github" => Ok(ProviderId::Github),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

/// One callable remote tool as announced by a provider's `tools/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name as the provider expects it in `tools/call`
    pub name: String,
    /// Human-readable description (may be empty)
    pub description: String,
    /// Property names declared by the tool's input schema.
    ///
    /// Empty when the provider did not declare a schema; argument
    /// adaptation then sends every assembled key unfiltered.
    pub schema_properties: Vec<String>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema_properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>) -> Self {
        self.schema_properties.push(name.into());
        self
    }

    pub fn with_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema_properties
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Build a descriptor from a raw tool listing entry.
    ///
    /// Accepts the schema under `input_schema`, `inputSchema` or `schema`.
    /// Returns `None` for entries without a string `name`.
    pub fn from_listing(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = obj.get("name")?.as_str()?;
        let description = obj
            .get("description")
            .and_then(|d| d.as_str())
            .unwrap_or_default();

        let schema = ["input_schema", "inputSchema", "schema"]
            .iter()
            .find_map(|key| obj.get(*key).filter(|s| s.is_object()));
        let properties = schema
            .and_then(|s| s.get("properties"))
            .and_then(|p| p.as_object())
            .map(|p| p.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();

        Some(Self::new(name, description).with_properties(properties))
    }

    /// Whether the provider declared any input properties for this tool.
    pub fn has_schema(&self) -> bool {
        !self.schema_properties.is_empty()
    }

    /// Lower-cased `name + " " + description`, used for token matching.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }
}

/// A provider's full tool set, in the order the provider listed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCatalog {
    pub provider: ProviderId,
    pub tools: Vec<ToolDescriptor>,
}

impl ProviderCatalog {
    pub fn new(provider: ProviderId, tools: Vec<ToolDescriptor>) -> Self {
        Self { provider, tools }
    }

    pub fn empty(provider: ProviderId) -> Self {
        Self::new(provider, Vec::new())
    }

    /// Case-insensitive lookup by tool name.
    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Discovered catalogs for every provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCatalog {
    providers: BTreeMap<ProviderId, ProviderCatalog>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, catalog: ProviderCatalog) {
        self.providers.insert(catalog.provider, catalog);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, catalog: ProviderCatalog) -> Self {
        self.insert(catalog);
        self
    }

    pub fn get(&self, provider: ProviderId) -> Option<&ProviderCatalog> {
        self.providers.get(&provider)
    }

    /// Tools for a provider; empty when the provider was never discovered.
    pub fn tools(&self, provider: ProviderId) -> &[ToolDescriptor] {
        self.providers
            .get(&provider)
            .map(|c| c.tools.as_slice())
            .unwrap_or(&[])
    }

    pub fn providers(&self) -> impl Iterator<Item = &ProviderCatalog> {
        self.providers.values()
    }

    pub fn total_tools(&self) -> usize {
        self.providers.values().map(|c| c.tools.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_id_round_trip_through_str() {
        assert_eq!("jira".parse::<ProviderId>(), Ok(ProviderId::Jira));
        assert_eq!("GitHub".parse::<ProviderId>(), Ok(ProviderId::Github));
        assert!("gitlab".parse::<ProviderId>().is_err());
        assert_eq!(ProviderId::Github.to_string(), "github");
    }

    #[test]
    fn test_descriptor_from_listing_reads_schema_variants() {
        let snake = json!({
            "name": "search_issues",
            "description": "Search issues",
            "input_schema": {"type": "object", "properties": {"jql": {}, "maxResults": {}}}
        });
        let camel = json!({
            "name": "list_commits",
            "inputSchema": {"properties": {"owner": {}, "repo": {}}}
        });
        let plain = json!({"name": "get_me", "schema": {"properties": {"verbose": {}}}});

        let d = ToolDescriptor::from_listing(&snake).unwrap();
        assert_eq!(d.name, "search_issues");
        assert_eq!(d.description, "Search issues");
        assert!(d.schema_properties.contains(&"jql".to_string()));
        assert!(d.schema_properties.contains(&"maxResults".to_string()));

        let d = ToolDescriptor::from_listing(&camel).unwrap();
        assert_eq!(d.description, "");
        assert_eq!(d.schema_properties.len(), 2);

        let d = ToolDescriptor::from_listing(&plain).unwrap();
        assert_eq!(d.schema_properties, vec!["verbose".to_string()]);
    }

    #[test]
    fn test_descriptor_from_listing_without_schema() {
        let d = ToolDescriptor::from_listing(&json!({"name": "ping"})).unwrap();
        assert!(!d.has_schema());
    }

    #[test]
    fn test_descriptor_from_listing_rejects_nameless() {
        assert!(ToolDescriptor::from_listing(&json!({"description": "x"})).is_none());
        assert!(ToolDescriptor::from_listing(&json!("search_issues")).is_none());
    }

    #[test]
    fn test_provider_catalog_find_is_case_insensitive() {
        let catalog = ProviderCatalog::new(
            ProviderId::Jira,
            vec![ToolDescriptor::new("jira_create_issue", "Create")],
        );
        assert!(catalog.find("JIRA_CREATE_ISSUE").is_some());
        assert!(catalog.find("create_issue").is_none());
    }

    #[test]
    fn test_tool_catalog_missing_provider_is_empty() {
        let catalog = ToolCatalog::new().with(ProviderCatalog::new(
            ProviderId::Github,
            vec![ToolDescriptor::new("list_commits", "")],
        ));
        assert!(catalog.tools(ProviderId::Jira).is_empty());
        assert_eq!(catalog.tools(ProviderId::Github).len(), 1);
        assert_eq!(catalog.total_tools(), 1);
    }
}
