// Data models for tasklist

use chrono::NaiveDate;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier assigned to a task when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh, time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Urgent,
    #[default]
    General,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 2] = [Category::Urgent, Category::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Urgent => "Urgent",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "urgent" => Ok(Category::Urgent),
            "general" => Ok(Category::General),
            other => Err(eyre!("Invalid category '{}' (expected urgent or general)", other)),
        }
    }
}

/// A to-do item
///
/// The label is trimmed on construction and can never be empty, so every
/// `Task` that reaches the store is already valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    due_date: NaiveDate,
    category: Category,
}

impl Task {
    pub fn new(text: &str, due_date: NaiveDate, category: Category) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(eyre!("Task text cannot be empty or whitespace-only"));
        }

        Ok(Self {
            id: TaskId::new(),
            text: text.to_string(),
            due_date,
            category,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid date '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')", s))
}
