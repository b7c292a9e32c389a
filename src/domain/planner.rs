//! Daily plans: time-blocked schedule, todo list, summary and mood

use crate::domain::ids::generate_id;
use crate::error::{EmbedLinkError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Task,
    DeepWork,
    Meeting,
    Break,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlockType::Task => "task",
            BlockType::DeepWork => "deep_work",
            BlockType::Meeting => "meeting",
            BlockType::Break => "break",
        };
        f.pad(s)
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "task" => Ok(BlockType::Task),
            "deep_work" | "deep" => Ok(BlockType::DeepWork),
            "meeting" => Ok(BlockType::Meeting),
            "break" => Ok(BlockType::Break),
            _ => Err(format!(
                "Invalid block type: '{}'. Valid types are: task, deep_work, meeting, break",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Stress,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Stress => "stress",
        };
        f.pad(s)
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "stress" | "stressed" => Ok(Mood::Stress),
            _ => Err(format!(
                "Invalid mood: '{}'. Valid moods are: happy, neutral, stress",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBlock {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    #[serde(default)]
    pub schedule: Vec<ScheduleBlock>,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub mood: Mood,
}

/// Parse `H:MM`/`HH:MM` and return it zero-padded so that string order
/// matches time order.
pub fn normalize_clock(value: &str) -> Result<String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| {
            EmbedLinkError::InvalidInput(format!("Invalid time: '{}'. Expected HH:MM", value))
        })
}

impl DailyPlan {
    pub fn empty(date: NaiveDate) -> Self {
        DailyPlan {
            date,
            schedule: Vec::new(),
            todos: Vec::new(),
            summary: String::new(),
            mood: Mood::Neutral,
        }
    }

    /// Find the plan for `date`, or an unsaved empty one.
    pub fn for_date(plans: &[DailyPlan], date: NaiveDate) -> DailyPlan {
        plans
            .iter()
            .find(|p| p.date == date)
            .cloned()
            .unwrap_or_else(|| DailyPlan::empty(date))
    }

    /// Replace the stored plan with the same date, appending it at the end.
    pub fn save_into(self, plans: &mut Vec<DailyPlan>) {
        plans.retain(|p| p.date != self.date);
        plans.push(self);
    }

    /// Blank text is ignored.
    pub fn add_todo(&mut self, text: &str) -> Option<&TodoItem> {
        if text.trim().is_empty() {
            return None;
        }
        self.todos.push(TodoItem {
            id: generate_id(""),
            text: text.to_string(),
            completed: false,
        });
        self.todos.last()
    }

    pub fn toggle_todo(&mut self, id: &str) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete_todo(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        before != self.todos.len()
    }

    /// Add a block and keep the schedule ordered by start time.
    pub fn add_block(
        &mut self,
        title: &str,
        start: &str,
        end: &str,
        kind: BlockType,
    ) -> Result<Option<&ScheduleBlock>> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        let start_time = normalize_clock(start)?;
        let end_time = normalize_clock(end)?;
        let id = generate_id("sb");

        self.schedule.push(ScheduleBlock {
            id: id.clone(),
            title: title.to_string(),
            start_time,
            end_time,
            kind,
            completed: false,
        });
        self.schedule.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(self.schedule.iter().find(|b| b.id == id))
    }

    pub fn delete_block(&mut self, id: &str) -> bool {
        let before = self.schedule.len();
        self.schedule.retain(|b| b.id != id);
        before != self.schedule.len()
    }

    pub fn completed_todos(&self) -> Vec<&str> {
        self.todos
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.text.as_str())
            .collect()
    }
}
