//! `busline browse` - interactive search page.
//!
//! Reads one command per line from stdin and redraws the page on stdout
//! whenever something changes. On a terminal, backend answers are applied
//! as they arrive; with piped input each command is settled before the
//! next one is read, so scripts behave deterministically.

use anyhow::Result;
use busline_model::RecordId;
use busline_view::{PageOutcome, SearchPage};
use clap::Args;
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::Settings;

const HELP: &str = "\
Commands:
  select <line>   show records for a bus line
  clear           reset the selection
  open <n>        open the action menu of row n
  close <n>       close the action menu of row n
  delete <n>      delete the record in row n (menu must be open)
  refresh         reload the current line
  retry           reload the bus line list
  show            redraw the page
  help            print this help
  quit            leave";

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Select this bus line right after the line list loads.
    #[arg(long)]
    pub line: Option<String>,
}

/// How input and backend answers interleave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Apply answers as they arrive while waiting for input.
    Interactive,
    /// Settle all outstanding work after every command.
    Scripted,
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Select(String),
    Clear,
    Open(usize),
    Close(usize),
    Delete(usize),
    Refresh,
    Retry,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a row number")]
    BadRow(String),

    #[error("no row {0} on the page")]
    NoSuchRow(usize),
}

impl FromStr for BrowseCommand {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(w, r)| (w, r.trim()));

        let row = |name: &'static str| -> Result<usize, CommandError> {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument(name));
            }
            match rest.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(CommandError::BadRow(rest.to_string())),
            }
        };

        match word.to_ascii_lowercase().as_str() {
            // `select` with no argument clears, like picking the placeholder
            "select" | "s" => Ok(Self::Select(rest.to_string())),
            "clear" => Ok(Self::Clear),
            "open" | "o" => row("open").map(Self::Open),
            "close" | "c" => row("close").map(Self::Close),
            "delete" | "d" => row("delete").map(Self::Delete),
            "refresh" | "r" => Ok(Self::Refresh),
            "retry" => Ok(Self::Retry),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Execute the browse command against the configured backend.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the page cannot be
/// mounted, or stdin/stdout fail.
pub async fn execute(args: &BrowseArgs, settings: &Settings) -> Result<()> {
    let client = super::http_client(settings)?;
    let mut page = SearchPage::mount(&settings.view, super::http_providers(&client))?;

    let mode = if std::io::stdin().is_terminal() {
        SessionMode::Interactive
    } else {
        SessionMode::Scripted
    };

    if let Some(line) = &args.line {
        page.settle().await?;
        if let Err(err) = page.select(line) {
            tracing::warn!(line = %line, error = %err, "initial line not selectable");
        }
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(&mut page, stdin, &mut stdout, mode).await
}

enum Input {
    Line(Option<String>),
    Applied,
}

/// Drive a mounted page from line-oriented input.
///
/// # Errors
///
/// Returns an error on I/O failure or a broken page event loop. Command
/// mistakes are reported on `out` and do not end the session.
pub async fn run_session<R, W>(
    page: &mut SearchPage,
    input: R,
    out: &mut W,
    mode: SessionMode,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut input = input.lines();
    if mode == SessionMode::Scripted {
        drain(page, out).await?;
    }
    write!(out, "{}", page.render())?;
    out.flush()?;

    loop {
        let next = tokio::select! {
            applied = page.next_event(), if mode == SessionMode::Interactive && page.has_pending() => {
                applied?;
                Input::Applied
            }
            line = input.next_line() => Input::Line(line?),
        };

        let line = match next {
            Input::Applied => {
                report_outcomes(page, out)?;
                write!(out, "\n{}", page.render())?;
                out.flush()?;
                continue;
            }
            Input::Line(None) => break,
            Input::Line(Some(line)) => line,
        };

        let command = match line.parse::<BrowseCommand>() {
            Ok(BrowseCommand::Quit) => break,
            Ok(BrowseCommand::Help) => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        if let Err(err) = apply(page, command) {
            writeln!(out, "{err}")?;
            continue;
        }
        if mode == SessionMode::Scripted {
            drain(page, out).await?;
        }
        write!(out, "\n{}", page.render())?;
        out.flush()?;
    }

    tracing::debug!(pending = page.has_pending(), "browse session ended");
    Ok(())
}

fn apply(page: &mut SearchPage, command: BrowseCommand) -> Result<()> {
    match command {
        BrowseCommand::Select(value) => page.select(&value)?,
        BrowseCommand::Clear => page.clear()?,
        BrowseCommand::Open(n) => {
            let id = row_id(page, n)?;
            page.open_menu(id)?;
        }
        BrowseCommand::Close(n) => {
            let id = row_id(page, n)?;
            page.close_menu(id)?;
        }
        BrowseCommand::Delete(n) => {
            let id = row_id(page, n)?;
            page.delete(id)?;
        }
        BrowseCommand::Refresh => page.refresh()?,
        BrowseCommand::Retry => page.retry_categories(),
        BrowseCommand::Show | BrowseCommand::Help | BrowseCommand::Quit => {}
    }
    Ok(())
}

fn row_id(page: &SearchPage, n: usize) -> Result<RecordId, CommandError> {
    page.results()
        .rows()
        .get(n - 1)
        .map(|row| row.record.id)
        .ok_or(CommandError::NoSuchRow(n))
}

/// Settle outstanding work, including refreshes triggered by deletes.
async fn drain<W: Write>(page: &mut SearchPage, out: &mut W) -> Result<()> {
    loop {
        page.settle().await?;
        if !report_outcomes(page, out)? {
            return Ok(());
        }
    }
}

/// Print delete outcomes and reload the list after a removal.
///
/// Returns whether a reload was started.
fn report_outcomes<W: Write>(page: &mut SearchPage, out: &mut W) -> Result<bool> {
    let mut reloaded = false;
    for outcome in page.take_outcomes() {
        match outcome {
            PageOutcome::RecordDeleted(id) => {
                writeln!(out, "Deleted {id}")?;
                page.refresh()?;
                reloaded |= page.has_pending();
            }
            PageOutcome::DeleteFailed { id, error } => {
                writeln!(out, "Could not delete {id}: {error}")?;
            }
        }
    }
    Ok(reloaded)
}
