//! CLI command definitions.
//!
//! Defined with clap's derive macros; `main` dispatches on `Command`.

use crate::format::OutputFormat;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Personal week planner backed by a local SQLite store.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the database file (overrides config).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task, or update the one with the same title and deadline.
    Add {
        title: String,

        /// Deadline: "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (midnight).
        #[arg(long)]
        deadline: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Card color: RedCard, BlueCard, YellowCard, GreenCard,
        /// OrangeCard or PurpleCard.
        #[arg(long, default_value = "RedCard")]
        color: String,

        /// Task type: Basic, Urgent or Important.
        #[arg(long = "type", default_value = "Basic", value_name = "TYPE")]
        kind: String,
    },

    /// List the tasks for one day (today if omitted).
    List {
        /// Day to list, YYYY-MM-DD.
        date: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show the current week with each day's tasks.
    Week {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Toggle completion on a task.
    Done {
        /// Task id, as shown by `list`.
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task id, as shown by `list`.
        id: String,
    },
}

/// Parse a deadline argument. A bare date means midnight.
pub fn parse_deadline(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    let date = parse_date(s)?;
    Ok(NaiveDateTime::new(date, NaiveTime::MIN))
}

/// Parse a date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}
