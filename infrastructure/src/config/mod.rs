//! Configuration file loading for taskbridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TASKBRIDGE_<SECTION>__<KEY>` (e.g. `TASKBRIDGE_GITHUB__TOKEN`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./taskbridge.toml` or `./.taskbridge.toml`
//! 4. Global: `<config_dir>/taskbridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileGithubConfig, FileJiraConfig, JiraCredentials};
pub use loader::ConfigLoader;
