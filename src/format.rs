//! Output rendering for the CLI.

use crate::types::Task;
use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

fn task_lines(task: &Task, out: &mut String) {
    let mark = if task.is_completed { "x" } else { " " };
    out.push_str(&format!(
        "  {} [{}] {}  {} / {}  ({})\n",
        task.deadline.format("%H:%M"),
        mark,
        task.title,
        task.kind.as_str(),
        task.color.as_str(),
        task.id,
    ));
    if !task.description.is_empty() {
        out.push_str(&format!("            {}\n", task.description));
    }
}

/// Render one day's tasks.
pub fn render_day(date: NaiveDate, tasks: &[Task], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tasks)?),
        OutputFormat::Text => {
            let mut out = format!("{}\n", date.format("%a %Y-%m-%d"));
            if tasks.is_empty() {
                out.push_str("  (no tasks)\n");
            }
            for task in tasks {
                task_lines(task, &mut out);
            }
            Ok(out)
        }
    }
}

/// Render a week of days with their tasks, ascending.
pub fn render_week(days: &[(NaiveDate, Vec<Task>)], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for (date, tasks) in days {
                map.insert(date.to_string(), serde_json::to_value(tasks)?);
            }
            Ok(serde_json::to_string_pretty(&map)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (date, tasks) in days {
                out.push_str(&render_day(*date, tasks, OutputFormat::Text)?);
            }
            Ok(out)
        }
    }
}
