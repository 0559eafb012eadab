//! Interactive session
//!
//! A session owns one `ItemStore` for the life of the process. Each input
//! line is split into words (honouring quotes), parsed with clap, and
//! dispatched to a command handler. Errors are reported and the session
//! keeps going; `quit` or end of input ends it.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use shoplist_core::ItemStore;

use crate::commands;
use crate::commands::item::ItemEdit;
use crate::output::Output;

const PROMPT: &str = "shoplist> ";

#[derive(Parser, Debug)]
#[command(name = "shoplist", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Add an item to the end of the list
    #[command(alias = "a")]
    Add {
        /// Item name (multiple words are joined)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// How many to buy
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List all items
    #[command(alias = "ls")]
    List,
    /// Show item details
    Show {
        /// Item ID (full UUID or prefix)
        id: String,
    },
    /// Change name, quantity or notes of an item
    Edit {
        /// Item ID (full UUID or prefix)
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,
        /// New notes
        #[arg(short, long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long)]
        clear_notes: bool,
    },
    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item ID (full UUID or prefix)
        id: String,
    },
    /// Search names and notes (no query lists everything)
    Search {
        /// Search query (multiple words are joined)
        query: Vec<String>,
    },
    /// Mark an item as purchased, or back again
    Toggle {
        /// Item ID (full UUID or prefix)
        id: String,
    },
    /// Remove all purchased items
    ClearPurchased,
    /// Put the list in a new order (every item, exactly once)
    Reorder {
        /// Item IDs in the desired order
        ids: Vec<String>,
    },
    /// Show item counts
    Status,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// What the session should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    store: ItemStore,
    output: Output,
}

impl Session {
    pub fn new(store: ItemStore, output: Output) -> Self {
        Self { store, output }
    }

    #[cfg(test)]
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Read and execute lines until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> Result<()> {
        if interactive {
            self.output
                .message("shoplist - type 'help' for commands, 'quit' to leave");
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                print!("{}", PROMPT);
                io::stdout().flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read input")?;

            match self.execute_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => self.output.error(&e),
            }
        }

        info!(items = self.store.len(), "Session ended");
        Ok(())
    }

    /// Execute one line of input
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = split_words(line)?;
        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp
                        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                        | ErrorKind::DisplayVersion
                ) =>
            {
                e.print()?;
                return Ok(Flow::Continue);
            }
            Err(e) => bail!("{}", e.render().to_string().trim_end()),
        };

        debug!(command = ?parsed.command, "Executing");
        self.dispatch(parsed.command)
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        let store = &mut self.store;
        let output = &self.output;

        match command {
            SessionCommand::Add {
                name,
                quantity,
                notes,
            } => commands::item::add(store, &name.join(" "), quantity, notes, output)?,
            SessionCommand::List => commands::item::list(store, output)?,
            SessionCommand::Show { id } => commands::item::show(store, &id, output)?,
            SessionCommand::Edit {
                id,
                name,
                quantity,
                notes,
                clear_notes,
            } => {
                let edit = ItemEdit {
                    name,
                    quantity,
                    notes,
                    clear_notes,
                };
                commands::item::edit(store, &id, edit, output)?
            }
            SessionCommand::Delete { id } => commands::item::delete(store, &id, output)?,
            SessionCommand::Search { query } => {
                let query = query.join(" ");
                commands::item::search(store, Some(query.as_str()), output)?
            }
            SessionCommand::Toggle { id } => commands::item::toggle(store, &id, output)?,
            SessionCommand::ClearPurchased => commands::item::clear_purchased(store, output)?,
            SessionCommand::Reorder { ids } => commands::item::reorder(store, &ids, output)?,
            SessionCommand::Status => commands::status::show(store, output)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

/// Split a line into words
///
/// Single and double quotes group words; a backslash escapes the next
/// character except inside single quotes.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('\''), _) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => bail!("Trailing backslash in input"),
            },
            (Some(_), _) => current.push(c),
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unclosed {} quote in input", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
