//! Presentation-layer state: the current week, the selected day's task
//! cache, and the in-progress draft.
//!
//! The planner sits between the front end and the store. It owns a read
//! cache of the selected day's tasks which is stale immediately after any
//! mutation and is only ever rebuilt by requerying the store; nothing
//! mutates it directly.

use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::types::{Task, TaskColor, TaskKind};
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, warn};

/// In-progress, not-yet-persisted field set for creating or editing a task.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub color: TaskColor,
    pub kind: TaskKind,
    pub deadline: NaiveDateTime,
    pub is_completed: bool,
}

impl TaskDraft {
    fn with_deadline(deadline: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            color: TaskColor::default(),
            kind: TaskKind::default(),
            deadline,
            is_completed: false,
        }
    }
}

/// The seven days of the calendar week containing `reference`, Sunday
/// first, ascending.
pub fn current_week_of(reference: NaiveDate) -> Vec<NaiveDate> {
    let back = reference.weekday().num_days_from_sunday() as u64;
    let start = reference - Days::new(back);
    (0..7).map(|offset| start + Days::new(offset)).collect()
}

/// Calendar-day equality, ignoring time of day.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Whether a deadline's time-of-day is at or after `now`, at minute
/// granularity.
///
/// Compares hour and minute only; the date component is ignored, so this
/// answers "is this slot still upcoming at this time of day", not "is this
/// exact instant in the future". It exists to highlight the active task in
/// a single-day list, where every candidate shares the selected date.
pub fn is_upcoming_slot(deadline: NaiveDateTime, now: NaiveTime) -> bool {
    deadline.hour() > now.hour()
        || (deadline.hour() == now.hour() && deadline.minute() >= now.minute())
}

/// UI-facing state container and mediator between user intent and the
/// store.
pub struct TaskPlanner {
    db: Database,
    current_week: Vec<NaiveDate>,
    selected_date: NaiveDate,
    filtered_tasks: Vec<Task>,
    draft: TaskDraft,
    editing: Option<Task>,
}

impl TaskPlanner {
    /// Build a planner anchored on the system clock.
    pub fn new(db: Database) -> StoreResult<Self> {
        Self::with_reference(db, Local::now().naive_local())
    }

    /// Build a planner anchored on an explicit reference instant. The week
    /// and initial selection are derived from it, so the result is
    /// deterministic for tests.
    pub fn with_reference(db: Database, reference: NaiveDateTime) -> StoreResult<Self> {
        let mut planner = Self {
            db,
            current_week: current_week_of(reference.date()),
            selected_date: reference.date(),
            filtered_tasks: Vec::new(),
            draft: TaskDraft::with_deadline(reference),
            editing: None,
        };
        planner.refresh_filtered_tasks()?;
        Ok(planner)
    }

    pub fn current_week(&self) -> &[NaiveDate] {
        &self.current_week
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Read-only snapshot of the selected day's tasks, ascending by
    /// deadline.
    pub fn filtered_tasks(&self) -> &[Task] {
        &self.filtered_tasks
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Mutable access to the draft fields for the front end to fill in.
    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    /// The task being edited, or `None` when the draft is a new task.
    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    /// Whether the deadline's time slot is still upcoming right now.
    pub fn is_upcoming(&self, deadline: NaiveDateTime) -> bool {
        is_upcoming_slot(deadline, Local::now().time())
    }

    /// Change the selected day and rebuild the filtered view for it.
    pub fn select_date(&mut self, date: NaiveDate) -> StoreResult<()> {
        self.selected_date = date;
        self.refresh_filtered_tasks()
    }

    /// Requery the store for the selected day. The cache is replaced only
    /// when the query succeeds.
    pub fn refresh_filtered_tasks(&mut self) -> StoreResult<()> {
        let tasks = self.db.tasks_for_day(self.selected_date)?;
        self.filtered_tasks = tasks;
        Ok(())
    }

    /// Persist the draft via the store's `(title, deadline)` upsert.
    ///
    /// Returns false without touching the store when the title is empty,
    /// and false when the store fails to commit; the draft is left intact
    /// in both cases so the user can retry.
    pub fn save_draft(&mut self) -> bool {
        if let Err(e) = self.validate_draft() {
            warn!(error = %e, "rejected save");
            return false;
        }

        let d = &self.draft;
        match self
            .db
            .upsert_task(&d.title, &d.description, d.deadline, d.color, d.kind, d.is_completed)
        {
            Ok(task) => {
                debug!(task_id = %task.id, "draft saved");
                if let Err(e) = self.refresh_filtered_tasks() {
                    warn!(error = %e, "filtered view refresh failed after save");
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to save draft");
                false
            }
        }
    }

    fn validate_draft(&self) -> StoreResult<()> {
        if self.draft.title.is_empty() {
            return Err(StoreError::invalid("title", "must not be empty"));
        }
        Ok(())
    }

    /// Flip a task's completion state, then rebuild the filtered view.
    pub fn mark_complete(&mut self, task: &Task) -> StoreResult<()> {
        self.db.toggle_completion(&task.id)?;
        self.refresh_filtered_tasks()
    }

    /// Delete a task, then rebuild the filtered view. The view is not
    /// touched when the delete fails.
    pub fn delete_task(&mut self, task: &Task) -> StoreResult<()> {
        self.db.delete_task(&task.id)?;
        self.refresh_filtered_tasks()
    }

    /// Clear the draft back to defaults (Basic kind, red card, deadline
    /// now) and leave create mode active.
    pub fn reset_draft(&mut self) {
        self.draft = TaskDraft::with_deadline(Local::now().naive_local());
        self.editing = None;
    }

    /// Copy an existing task's fields into the draft for editing.
    pub fn load_draft_from_task(&mut self, task: &Task) {
        self.draft = TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            color: task.color,
            kind: task.kind,
            deadline: task.deadline,
            is_completed: task.is_completed,
        };
        self.editing = Some(task.clone());
    }
}
