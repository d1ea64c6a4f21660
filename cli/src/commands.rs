//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{output, sources}` as JSON
    Json,
    /// Plain-text bullet listing followed by sources
    Text,
}

/// CLI arguments for taskbridge
#[derive(Parser, Debug)]
#[command(name = "taskbridge")]
#[command(author, version, about = "Answer questions with Jira and GitHub data over MCP")]
#[command(long_about = r#"
taskbridge turns a question into calls against the Jira and GitHub MCP
servers, runs them concurrently and merges the results into one answer.

Questions without tracker or repository words are not sent to any server.

Configuration files are loaded from (in priority order):
1. TASKBRIDGE_* environment variables (e.g. TASKBRIDGE_GITHUB__TOKEN)
2. --config <path>                       Explicit config file
3. ./taskbridge.toml                     Project-level config
4. ~/.config/taskbridge/config.toml      Global config

Example:
  taskbridge "show me open permission bugs in jira"
  taskbridge "list commits for repo:acme/widgets"
  taskbridge --plan "any pull requests about login?"
  taskbridge "create a bug title - Login fails, description - cannot log in"
"#)]
pub struct Cli {
    /// The question to answer
    pub question: Option<String>,

    /// Print the planned tool calls without executing them
    #[arg(long)]
    pub plan: bool,

    /// Print the discovered tool catalog and exit
    #[arg(long)]
    pub tools: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["taskbridge", "any jira bugs?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("any jira bugs?"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(!cli.plan);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "taskbridge",
            "--plan",
            "-o",
            "text",
            "-vv",
            "--config",
            "custom.toml",
            "list commits",
        ])
        .unwrap();
        assert!(cli.plan);
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_invalid_output_format() {
        assert!(Cli::try_parse_from(["taskbridge", "-o", "yaml", "q"]).is_err());
    }
}
