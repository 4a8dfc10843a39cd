//! Core types for the taskday store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage format for deadlines: fixed-width ISO text, so lexicographic
/// order in SQLite matches chronological order.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Timezone-naive local datetime.
    pub deadline: NaiveDateTime,
    pub color: TaskColor,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub is_completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Card color tag. Closed palette; stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskColor {
    #[default]
    RedCard,
    BlueCard,
    YellowCard,
    GreenCard,
    OrangeCard,
    PurpleCard,
}

impl TaskColor {
    pub const ALL: [TaskColor; 6] = [
        TaskColor::RedCard,
        TaskColor::BlueCard,
        TaskColor::YellowCard,
        TaskColor::GreenCard,
        TaskColor::OrangeCard,
        TaskColor::PurpleCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskColor::RedCard => "RedCard",
            TaskColor::BlueCard => "BlueCard",
            TaskColor::YellowCard => "YellowCard",
            TaskColor::GreenCard => "GreenCard",
            TaskColor::OrangeCard => "OrangeCard",
            TaskColor::PurpleCard => "PurpleCard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RedCard" => Some(TaskColor::RedCard),
            "BlueCard" => Some(TaskColor::BlueCard),
            "YellowCard" => Some(TaskColor::YellowCard),
            "GreenCard" => Some(TaskColor::GreenCard),
            "OrangeCard" => Some(TaskColor::OrangeCard),
            "PurpleCard" => Some(TaskColor::PurpleCard),
            _ => None,
        }
    }
}

/// Task type tag. Closed set; stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    Basic,
    Urgent,
    Important,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::Basic, TaskKind::Urgent, TaskKind::Important];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Basic => "Basic",
            TaskKind::Urgent => "Urgent",
            TaskKind::Important => "Important",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Basic" => Some(TaskKind::Basic),
            "Urgent" => Some(TaskKind::Urgent),
            "Important" => Some(TaskKind::Important),
            _ => None,
        }
    }
}
