//! Execute Plan use case
//!
//! Dispatches every planned task concurrently and waits for all of them.
//! Each task adapts its arguments right before its call; a failing call
//! only fails its own outcome.

use crate::ports::tool_client::ToolClients;
use futures::future::join_all;
use taskbridge_domain::{ArgumentAdapter, CallOutcome, Task, ToolCallError};
use tracing::{debug, info, warn};

pub struct ExecutePlanUseCase<'a> {
    clients: &'a ToolClients,
    adapter: &'a ArgumentAdapter,
}

impl<'a> ExecutePlanUseCase<'a> {
    pub fn new(clients: &'a ToolClients, adapter: &'a ArgumentAdapter) -> Self {
        Self { clients, adapter }
    }

    /// Run all tasks; outcomes come back in task order.
    pub async fn execute(&self, tasks: Vec<Task>) -> Vec<CallOutcome> {
        info!("Executing {} task(s)", tasks.len());
        let outcomes = join_all(tasks.into_iter().map(|task| self.call(task))).await;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            "Execution finished: {} succeeded, {} failed",
            outcomes.len() - failed,
            failed
        );
        outcomes
    }

    async fn call(&self, task: Task) -> CallOutcome {
        let Some(client) = self.clients.get(task.provider) else {
            warn!("No client registered for {}", task.provider);
            let provider = task.provider;
            return CallOutcome::failure(task, ToolCallError::UnknownProvider(provider));
        };

        let arguments = self.adapter.adapt_task(&task);
        debug!("Calling {} with {:?}", task.label(), arguments);

        match client.call_tool(&task.tool, arguments).await {
            Ok(envelope) => CallOutcome::success(task, envelope.into_payload()),
            Err(e) => {
                warn!("{} failed: {}", task.label(), e);
                CallOutcome::failure(task, e.into())
            }
        }
    }
}
