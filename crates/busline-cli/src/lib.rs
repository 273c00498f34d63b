//! # busline-cli
//!
//! Terminal front end for bus-line search.
//!
//! ## Commands
//!
//! - `busline browse` - Interactive search page
//! - `busline lines` - Print the available bus lines
//!
//! ## Configuration
//!
//! Settings come from an optional TOML file (`--config`), then the
//! `BUSLINE_BASE_URL` environment variable or `--base-url`, then other flags.

#![allow(missing_docs)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]

pub mod commands;
pub mod settings;

pub use settings::{ConfigError, Settings};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Busline - search lost-and-found items by bus line.
#[derive(Debug, Parser)]
#[command(name = "busline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overriding the settings file.
    #[arg(long, global = true, env = "BUSLINE_BASE_URL")]
    pub base_url: Option<String>,

    /// Records per result page, overriding the settings file.
    #[arg(long, global = true)]
    pub page_limit: Option<u32>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective settings: file, then environment and flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        if let Some(url) = &self.base_url {
            settings.client.base_url.clone_from(url);
        }
        if let Some(limit) = self.page_limit {
            settings.view.page_limit = limit;
        }
        Ok(settings)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive search page.
    Browse(commands::browse::BrowseArgs),
    /// Print the available bus lines.
    Lines(commands::lines::LinesArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "busline",
            "--base-url",
            "http://buses.local:9000",
            "--page-limit",
            "5",
            "lines",
        ]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.client.base_url, "http://buses.local:9000");
        assert_eq!(settings.view.page_limit, 5);
        assert!(matches!(cli.command, Commands::Lines(_)));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let cli = Cli::parse_from(["busline", "--config", "/nonexistent/busline.toml", "browse"]);
        assert!(matches!(cli.settings(), Err(ConfigError::Read { .. })));
    }
}
