//! taskday: a week-view to-do list in the terminal.
//!
//! Thin front end over the planner; all state lives in the store and the
//! planner's derived caches.

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use taskday::cli::{Cli, Command, parse_date, parse_deadline};
use taskday::config::Config;
use taskday::db::Database;
use taskday::format::{OutputFormat, render_day, render_week};
use taskday::planner::TaskPlanner;
use taskday::types::{TaskColor, TaskKind};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load_or_default();
    if let Some(db_path) = cli.db {
        config.db_path = db_path;
    }
    config.ensure_db_dir()?;

    let db = Database::open(&config.db_path)
        .with_context(|| format!("opening database at {}", config.db_path.display()))?;
    debug!(path = %config.db_path.display(), "database opened");

    let mut planner = TaskPlanner::new(db.clone())?;

    match cli.command {
        Command::Add {
            title,
            deadline,
            description,
            color,
            kind,
        } => {
            let deadline = parse_deadline(&deadline)?;
            let Some(color) = TaskColor::parse(&color) else {
                bail!("unknown color '{color}'");
            };
            let Some(kind) = TaskKind::parse(&kind) else {
                bail!("unknown task type '{kind}'");
            };

            let draft = planner.draft_mut();
            draft.title = title;
            draft.description = description;
            draft.deadline = deadline;
            draft.color = color;
            draft.kind = kind;

            planner.select_date(deadline.date())?;
            if !planner.save_draft() {
                bail!("task not saved");
            }
            print!(
                "{}",
                render_day(planner.selected_date(), planner.filtered_tasks(), OutputFormat::Text)?
            );
        }

        Command::List { date, format } => {
            let date = match date {
                Some(s) => parse_date(&s)?,
                None => Local::now().date_naive(),
            };
            planner.select_date(date)?;
            print!("{}", render_day(date, planner.filtered_tasks(), format)?);
        }

        Command::Week { format } => {
            let mut days = Vec::with_capacity(7);
            for date in planner.current_week().to_vec() {
                planner.select_date(date)?;
                days.push((date, planner.filtered_tasks().to_vec()));
            }
            print!("{}", render_week(&days, format)?);
        }

        Command::Done { id } => {
            let task = db.get_task(&id)?;
            planner.select_date(task.deadline.date())?;
            planner.mark_complete(&task)?;
            print!(
                "{}",
                render_day(planner.selected_date(), planner.filtered_tasks(), OutputFormat::Text)?
            );
        }

        Command::Delete { id } => {
            let task = db.get_task(&id)?;
            planner.select_date(task.deadline.date())?;
            planner.delete_task(&task)?;
            println!("deleted '{}'", task.title);
        }
    }

    Ok(())
}
