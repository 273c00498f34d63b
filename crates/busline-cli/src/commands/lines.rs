//! `busline lines` - print the available bus lines.

use anyhow::{Context, Result};
use clap::Args;

use crate::Settings;

#[derive(Debug, Args)]
pub struct LinesArgs {
    /// Print a JSON array instead of one line per entry.
    #[arg(long)]
    pub json: bool,
}

/// Execute the lines command.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or answers badly.
pub async fn execute(args: &LinesArgs, settings: &Settings) -> Result<()> {
    let client = super::http_client(settings)?;
    let lines = client
        .list_buses()
        .await
        .context("failed to list bus lines")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else if lines.is_empty() {
        println!("{}", busline_view::render::NO_LINES);
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}
