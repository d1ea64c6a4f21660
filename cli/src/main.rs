//! CLI entrypoint for taskbridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use commands::{Cli, OutputFormat};
use serde_json::json;
use std::sync::Arc;
use taskbridge_application::{OrchestrateUseCase, OrchestrationContext, OrchestrationOutcome};
use taskbridge_domain::{Citation, ConfigIssue, Severity, ToolCatalog, format_listing};
use taskbridge_infrastructure::{ConfigLoader, FileConfig, McpClients};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout carries only the answer
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    // === Dependency Injection ===
    let clients = McpClients::from_config(&config);
    let context = Arc::new(OrchestrationContext::new(
        clients.tool_clients(),
        config.planner_settings(),
    ));

    let result = run(&cli, context).await;
    clients.close().await;
    result
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Configuration has errors; see messages above");
    }
    Ok(config)
}

async fn run(cli: &Cli, context: Arc<OrchestrationContext>) -> Result<()> {
    if cli.tools {
        let catalog = context.catalog().await;
        print_catalog(catalog, cli.output)?;
        return Ok(());
    }

    let Some(question) = cli.question.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        bail!("Question is required. Use --tools to list the available tools.");
    };
    info!("Question: {}", question);

    let use_case = OrchestrateUseCase::new(context);

    if cli.plan {
        match use_case.plan(question).await {
            Some(plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
            None => println!("No tools needed for this question."),
        }
        return Ok(());
    }

    let outcome = use_case.execute(question).await;
    match (cli.output, &outcome) {
        (OutputFormat::Json, OrchestrationOutcome::NoToolOutput) => {
            println!("{}", json!({"output": null, "sources": []}))
        }
        (OutputFormat::Json, OrchestrationOutcome::Answer { .. }) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?)
        }
        (OutputFormat::Text, OrchestrationOutcome::NoToolOutput) => {
            println!("No tool data for this question.")
        }
        (OutputFormat::Text, OrchestrationOutcome::Answer { output, sources }) => {
            println!("{}", format_listing(output));
            print_sources(sources);
        }
    }

    Ok(())
}

fn print_catalog(catalog: &ToolCatalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(catalog)?),
        OutputFormat::Text => {
            for provider in catalog.providers() {
                println!("{} ({} tools)", provider.provider, provider.tools.len());
                for tool in &provider.tools {
                    println!("  - {}: {}", tool.name, tool.description);
                }
            }
        }
    }
    Ok(())
}

fn print_sources(sources: &[Citation]) {
    if sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for citation in sources {
        println!("  [{}] {}", citation.chunk_id, citation.source);
    }
}
