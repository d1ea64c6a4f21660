//! Orchestrate use case
//!
//! The full plan-execute-normalize flow for one user message:
//!
//! 1. gate: skip tools entirely when the message has no trigger words
//! 2. discover: prime the catalog cache (once per process)
//! 3. plan: heuristic planner over the cached catalog
//! 4. execute: concurrent fan-out, failures isolated per task
//! 5. aggregate: buckets + citations, or summary lines

use crate::ports::tool_client::ToolClients;
use crate::use_cases::catalog_cache::ToolCatalogCache;
use crate::use_cases::execute_plan::ExecutePlanUseCase;
use serde::Serialize;
use std::sync::Arc;
use taskbridge_domain::{
    AggregateOutput, Aggregator, ArgumentAdapter, Citation, Plan, PlannerSettings, Planner,
    ToolCatalog, needs_tools,
};
use tracing::{debug, info, warn};

/// Everything a request needs: provider clients, the catalog cache and
/// planner settings. Constructed once and shared.
#[derive(Debug)]
pub struct OrchestrationContext {
    clients: ToolClients,
    catalog: ToolCatalogCache,
    settings: PlannerSettings,
    adapter: ArgumentAdapter,
}

impl OrchestrationContext {
    pub fn new(clients: ToolClients, settings: PlannerSettings) -> Self {
        Self {
            adapter: ArgumentAdapter::new(&settings),
            catalog: ToolCatalogCache::new(),
            clients,
            settings,
        }
    }

    pub fn clients(&self) -> &ToolClients {
        &self.clients
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// The tool catalog, discovering it on first use.
    pub async fn catalog(&self) -> &ToolCatalog {
        self.catalog.get_or_discover(&self.clients).await
    }
}

/// Result of orchestrating one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrchestrationOutcome {
    /// No tool data; answer the message by other means
    NoToolOutput,
    /// Tool data for the downstream formatter
    Answer {
        output: AggregateOutput,
        sources: Vec<Citation>,
    },
}

impl OrchestrationOutcome {
    pub fn is_answer(&self) -> bool {
        matches!(self, OrchestrationOutcome::Answer { .. })
    }
}

/// Use case for answering a message with tool data
pub struct OrchestrateUseCase {
    context: Arc<OrchestrationContext>,
}

impl OrchestrateUseCase {
    pub fn new(context: Arc<OrchestrationContext>) -> Self {
        Self { context }
    }

    /// Plan a message without executing anything.
    ///
    /// `None` when the message does not need tools.
    pub async fn plan(&self, text: &str) -> Option<Plan> {
        let needs = needs_tools(text);
        info!("needs_tools={}", needs);
        if !needs {
            return None;
        }

        let catalog = self.context.catalog().await;
        let plan = Planner::new(catalog, &self.context.settings).plan(text);

        for capability in &plan.unresolved {
            warn!(
                "No {} tool available for '{}'; skipping",
                capability.provider(),
                capability
            );
        }
        info!("Planned {} task(s)", plan.len());
        for task in &plan.tasks {
            debug!("Planned {} with {:?}", task.label(), task.args);
        }
        Some(plan)
    }

    pub async fn execute(&self, text: &str) -> OrchestrationOutcome {
        let Some(plan) = self.plan(text).await else {
            return OrchestrationOutcome::NoToolOutput;
        };
        if plan.is_empty() {
            return OrchestrationOutcome::NoToolOutput;
        }

        let outcomes = ExecutePlanUseCase::new(&self.context.clients, &self.context.adapter)
            .execute(plan.tasks)
            .await;

        let result = Aggregator::new(&self.context.settings).aggregate(&outcomes);
        for line in &result.lines {
            debug!("{}", line);
        }
        info!(
            "Aggregated {} source(s), structured={}",
            result.sources.len(),
            result.output.as_structured().is_some()
        );

        OrchestrationOutcome::Answer {
            output: result.output,
            sources: result.sources,
        }
    }
}
