// Interactive terminal session: one TaskContext, both views, line commands

use crate::context::TaskContext;
use crate::filter::Filter;
use crate::models::{Category, TaskId, parse_date, today};
use crate::render;
use crate::views::{EditableView, GroupedView};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use eyre::{Context, Result, bail, eyre};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Command-line configuration for a session
#[derive(Debug, Clone, Parser)]
#[command(name = "tasklist")]
#[command(about = "tasklist - in-memory to-do list for the terminal")]
#[command(version)]
pub struct SessionConfig {
    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Date new tasks default to (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = date_arg)]
    pub today: Option<NaiveDate>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// A single line typed into the session
#[derive(Debug, Parser)]
#[command(name = "command", no_binary_name = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task
    Add {
        /// Task text
        text: Vec<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long, value_parser = date_arg)]
        due: Option<NaiveDate>,

        /// Category: urgent or general
        #[arg(short, long, value_parser = category_arg, conflicts_with = "urgent")]
        category: Option<Category>,

        /// Shorthand for --category urgent
        #[arg(short, long)]
        urgent: bool,
    },

    /// List tasks sorted by due date, numbered
    #[command(alias = "ls")]
    List {
        #[arg(short, long, value_parser = category_arg)]
        category: Option<Category>,

        /// Only tasks due on or before this date
        #[arg(long, value_parser = date_arg)]
        due_before: Option<NaiveDate>,

        /// Only tasks due after this date
        #[arg(long, value_parser = date_arg)]
        due_after: Option<NaiveDate>,

        /// Only tasks whose text contains this (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show all tasks grouped by category
    All,

    /// Toggle completion of a listed row
    Done { row: usize },

    /// Remove a listed row
    #[command(alias = "remove")]
    Rm { row: usize },

    /// Print the current tasks as JSON
    Export,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

fn date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

/// Split a line into words, honouring single and double quotes
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

fn category_arg(s: &str) -> std::result::Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

/// What the caller should do after a line has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Silent,
    Quit,
}

pub struct Session {
    context: TaskContext,
    grouped: GroupedView,
    editable: EditableView,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let context = TaskContext::new();
        let default_date = config.today.unwrap_or_else(today);

        let grouped = GroupedView::mount(&context.scope()).context("Failed to mount grouped view")?;
        let editable =
            EditableView::mount(&context.scope(), default_date).context("Failed to mount editable view")?;

        info!(%default_date, "Session started");
        Ok(Self {
            context,
            grouped,
            editable,
        })
    }

    /// Handle one input line
    ///
    /// Blank lines are ignored. Parse errors come back as `Err` with clap's
    /// message so the caller can print them and keep going.
    pub fn handle_line(&mut self, line: &str) -> Result<Reply> {
        let args = split_args(line)?;
        if args.is_empty() {
            return Ok(Reply::Silent);
        }

        if matches!(args[0].as_str(), "help" | "?") {
            let mut cmd = <CommandLine as clap::CommandFactory>::command();
            return Ok(Reply::Output(cmd.render_help().to_string()));
        }

        let parsed = match CommandLine::try_parse_from(&args) {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                return Ok(Reply::Output(e.to_string()));
            }
            Err(e) => return Err(eyre!("{}", e.to_string().trim_end())),
        };
        debug!(command = ?parsed.command, "handle_line: parsed");
        self.execute(parsed.command)
    }

    /// Drive the session from `input` until EOF or `quit`
    ///
    /// Replies go to `out`, errors to `err`. Lines that are not valid UTF-8
    /// are decoded lossily and handled like any other bad input.
    pub fn run<R, W, E>(&mut self, mut input: R, out: &mut W, err: &mut E, prompt: bool) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut buf = Vec::new();
        loop {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }

            buf.clear();
            let read = input.read_until(b'\n', &mut buf).context("Failed to read input")?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);

            match self.handle_line(&line) {
                Ok(Reply::Output(text)) => writeln!(out, "{}", text.trim_end())?,
                Ok(Reply::Silent) => {}
                Ok(Reply::Quit) => break,
                Err(e) => writeln!(err, "Error: {:#}", e)?,
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Add {
                text,
                due,
                category,
                urgent,
            } => {
                let composer = &mut self.editable.composer;
                composer.text = text.join(" ");
                composer.due_date = due.unwrap_or(composer.default_date());
                composer.category = if urgent {
                    Category::Urgent
                } else {
                    category.unwrap_or_default()
                };

                match self.editable.submit() {
                    Some(id) => {
                        let store = self.context.store();
                        let store = store.borrow();
                        let task = store
                            .get(id)
                            .ok_or_else(|| eyre!("Task {} vanished right after being added", id))?;
                        Ok(Reply::Output(render::render_added(task)))
                    }
                    None => Ok(Reply::Silent),
                }
            }
            Command::List {
                category,
                due_before,
                due_after,
                search,
            } => {
                let mut filters = Vec::new();
                if let Some(category) = category {
                    filters.push(Filter::category(category));
                }
                if let Some(date) = due_before {
                    filters.push(Filter::due_on_or_before(date));
                }
                if let Some(date) = due_after {
                    filters.push(Filter::due_after(date));
                }
                if let Some(needle) = search {
                    filters.push(Filter::text_contains(&needle));
                }

                let rows = self.editable.rows(&filters);
                Ok(Reply::Output(render::render_rows(&rows)))
            }
            Command::All => Ok(Reply::Output(render::render_groups(&self.grouped.groups()))),
            Command::Done { row } => {
                let id = self.resolve_row(row)?;
                let completed = self.editable.toggle_complete(id);
                let state = if completed { "completed" } else { "not completed" };
                Ok(Reply::Output(format!("Row {} marked {}", row, state)))
            }
            Command::Rm { row } => {
                let id = self.resolve_row(row)?;
                match self.editable.remove(id) {
                    Some(task) => Ok(Reply::Output(format!("Removed \"{}\"", task.text()))),
                    None => Ok(Reply::Silent),
                }
            }
            Command::Export => {
                let store = self.context.store();
                let json = serde_json::to_string_pretty(store.borrow().tasks()).context("Failed to serialize tasks")?;
                Ok(Reply::Output(json))
            }
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn resolve_row(&self, row: usize) -> Result<TaskId> {
        self.editable
            .row_id(row)
            .ok_or_else(|| eyre!("No row {} in the last listing (run `list` first)", row))
    }
}
