//! Console flows: single query, interactive loop and history display
//!
//! Output goes through a `Write` so the flows can be driven from tests. Wiki and model
//! text is sanitized before it reaches the terminal. An [`Interrupt`] raised during a
//! query abandons it between stages; nothing is saved for an abandoned query.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::warn;

use crate::assistant::{Assistant, TextGenerator};
use crate::cli::interrupt::Interrupt;
use crate::history::HistoryStore;
use crate::models::HistoryEntry;
use crate::utils::strip_ansi_codes;
use crate::wiki::WikiApi;

/// Entries shown by the `history` command inside the interactive loop
pub const INTERACTIVE_HISTORY_LIMIT: usize = 10;

const RULE_WIDTH: usize = 60;

const INTERRUPTED_MESSAGE: &str = "Interrupted.";

/// Answer one query, print the answer and record it in the history log
///
/// Returns the answer, or `None` when `interrupt` was raised before it was complete.
/// A failure to save history is logged, not returned.
pub fn answer_query<W, G, O>(
    assistant: &Assistant<W, G>,
    history: &HistoryStore,
    query: &str,
    interrupt: &Interrupt,
    out: &mut O,
) -> Result<Option<String>>
where
    W: WikiApi,
    G: TextGenerator,
    O: Write,
{
    writeln!(out, "Searching Arch Wiki...")?;
    out.flush()?;
    let context = assistant.retrieve(query);
    if interrupt.take() {
        writeln!(out, "{}", INTERRUPTED_MESSAGE)?;
        return Ok(None);
    }

    writeln!(out, "Generating response...\n")?;
    out.flush()?;
    let response = assistant.answer(query, &context);
    if interrupt.take() {
        writeln!(out, "{}", INTERRUPTED_MESSAGE)?;
        return Ok(None);
    }

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", strip_ansi_codes(&response))?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    if let Err(e) = history.append(HistoryEntry::now(query, response.as_str())) {
        warn!("Failed to save history: {:#}", e);
    }

    Ok(Some(response))
}

/// Read queries line by line until `exit`, `quit` or end of input
///
/// `interrupt` is marked idle while waiting for a line.
pub fn run_interactive<W, G, R, O>(
    assistant: &Assistant<W, G>,
    history: &HistoryStore,
    input: R,
    interrupt: &Interrupt,
    out: &mut O,
) -> Result<()>
where
    W: WikiApi,
    G: TextGenerator,
    R: BufRead,
    O: Write,
{
    writeln!(out, "Arch Linux AI CLI - Interactive Mode")?;
    writeln!(out, "Type 'exit' or 'quit' to leave, 'history' to see past queries")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    let mut lines = input.lines();
    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        interrupt.set_idle(true);
        let next = lines.next();
        interrupt.set_idle(false);

        let Some(line) = next else {
            writeln!(out)?;
            break;
        };
        let line = line.context("Failed to read input")?;
        let query = line.trim();

        match query.to_lowercase().as_str() {
            "" => continue,
            "exit" | "quit" => break,
            "history" => show_history(history, INTERACTIVE_HISTORY_LIMIT, out)?,
            _ => {
                writeln!(out)?;
                answer_query(assistant, history, query, interrupt, out)?;
            }
        }
    }

    writeln!(out, "Goodbye! Stay rolling!")?;
    Ok(())
}

/// Print the newest `limit` history entries, oldest first
pub fn show_history<O: Write>(history: &HistoryStore, limit: usize, out: &mut O) -> Result<()> {
    let entries = history.recent(limit);
    if entries.is_empty() {
        writeln!(out, "No history found.")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "Query: {}", strip_ansi_codes(&entry.query))?;
        writeln!(out, "Asked: {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "{}", strip_ansi_codes(&entry.response))?;
    }

    Ok(())
}
