//! Task CRUD and day-range queries.

use super::{Database, now_ms};
use crate::error::{StoreError, StoreResult};
use crate::types::{DEADLINE_FORMAT, Task, TaskColor, TaskKind};
use chrono::{Days, NaiveDate, NaiveDateTime};
use rusqlite::{Row, params};
use tracing::debug;
use uuid::Uuid;

/// Render a deadline in its storage form.
fn deadline_text(deadline: NaiveDateTime) -> String {
    deadline.format(DEADLINE_FORMAT).to_string()
}

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let id: String = row.get("id")?;
    let title: String = row.get("title")?;
    let description: String = row.get("description")?;
    let deadline_raw: String = row.get("deadline")?;
    let color_raw: String = row.get("color")?;
    let kind_raw: String = row.get("kind")?;
    let is_completed: bool = row.get("is_completed")?;
    let created_at: i64 = row.get("created_at")?;
    let updated_at: i64 = row.get("updated_at")?;

    let deadline = NaiveDateTime::parse_from_str(&deadline_raw, DEADLINE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Task {
        id,
        title,
        description,
        deadline,
        color: TaskColor::parse(&color_raw).unwrap_or_default(),
        kind: TaskKind::parse(&kind_raw).unwrap_or_default(),
        is_completed,
        created_at,
        updated_at,
    })
}

impl Database {
    /// Insert or update a task, keyed on `(title, deadline)`.
    ///
    /// If a row with the same title and deadline exists, its remaining
    /// fields are overwritten in place and the id is preserved; otherwise a
    /// new row is created with a fresh id. The whole operation runs in one
    /// transaction, so a partial write is never observable.
    pub fn upsert_task(
        &self,
        title: &str,
        description: &str,
        deadline: NaiveDateTime,
        color: TaskColor,
        kind: TaskKind,
        is_completed: bool,
    ) -> StoreResult<Task> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let deadline = deadline_text(deadline);
            let now = now_ms();

            let existing: Option<String> = match tx.query_row(
                "SELECT id FROM tasks WHERE title = ?1 AND deadline = ?2",
                params![title, deadline],
                |row| row.get(0),
            ) {
                Ok(id) => Some(id),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e.into()),
            };

            let id = match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE tasks
                         SET description = ?2, deadline = ?3, color = ?4, kind = ?5,
                             is_completed = ?6, updated_at = ?7
                         WHERE id = ?1",
                        params![
                            id,
                            description,
                            deadline,
                            color.as_str(),
                            kind.as_str(),
                            is_completed,
                            now
                        ],
                    )?;
                    debug!(task_id = %id, %title, "updated existing task");
                    id
                }
                None => {
                    let id = Uuid::now_v7().to_string();
                    tx.execute(
                        "INSERT INTO tasks
                         (id, title, description, deadline, color, kind, is_completed,
                          created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                        params![
                            id,
                            title,
                            description,
                            deadline,
                            color.as_str(),
                            kind.as_str(),
                            is_completed,
                            now
                        ],
                    )?;
                    debug!(task_id = %id, %title, "inserted new task");
                    id
                }
            };

            let task = tx.query_row("SELECT * FROM tasks WHERE id = ?1", params![id], |row| {
                parse_task_row(row)
            })?;
            tx.commit()?;
            Ok(task)
        })
    }

    /// Remove the task with the given id.
    ///
    /// Deleting an id that does not exist is an error, not a no-op: a
    /// missing row here means the caller is working from a stale view.
    pub fn delete_task(&self, task_id: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            if affected == 0 {
                return Err(StoreError::not_found(task_id));
            }
            debug!(task_id = %task_id, "deleted task");
            Ok(())
        })
    }

    /// Flip the completion flag on the task with the given id.
    pub fn toggle_completion(&self, task_id: &str) -> StoreResult<Task> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE tasks SET is_completed = 1 - is_completed, updated_at = ?2
                 WHERE id = ?1",
                params![task_id, now_ms()],
            )?;
            if affected == 0 {
                return Err(StoreError::not_found(task_id));
            }
            conn.query_row("SELECT * FROM tasks WHERE id = ?1", params![task_id], |row| {
                parse_task_row(row)
            })
            .map_err(StoreError::from)
        })
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, task_id: &str) -> StoreResult<Task> {
        self.with_conn(|conn| {
            match conn.query_row("SELECT * FROM tasks WHERE id = ?1", params![task_id], |row| {
                parse_task_row(row)
            }) {
                Ok(task) => Ok(task),
                Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::not_found(task_id)),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// All tasks whose deadline falls within the given calendar day,
    /// ordered ascending by deadline. An empty day yields an empty vec.
    pub fn tasks_for_day(&self, date: NaiveDate) -> StoreResult<Vec<Task>> {
        let start = NaiveDateTime::new(date, chrono::NaiveTime::MIN);
        let end = start + Days::new(1);

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM tasks WHERE deadline >= ?1 AND deadline < ?2
                 ORDER BY deadline ASC",
            )?;
            let rows = stmt.query_map(
                params![deadline_text(start), deadline_text(end)],
                parse_task_row,
            )?;
            let tasks = rows.collect::<rusqlite::Result<Vec<Task>>>()?;
            Ok(tasks)
        })
    }

    /// All tasks in the store, ordered ascending by deadline.
    pub fn all_tasks(&self) -> StoreResult<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM tasks ORDER BY deadline ASC")?;
            let rows = stmt.query_map([], parse_task_row)?;
            let tasks = rows.collect::<rusqlite::Result<Vec<Task>>>()?;
            Ok(tasks)
        })
    }
}
