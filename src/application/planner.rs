//! Daily planner use cases
//!
//! Plans are keyed by date. Reading a day without a plan yields an empty
//! plan that is only stored once something changes.

use crate::domain::{BlockType, DailyPlan, Mood, ScheduleBlock, TodoItem};
use crate::error::{EmbedLinkError, Result};
use crate::infrastructure::{FileSystemRepository, GeminiClient, WorkspaceRepository};
use chrono::NaiveDate;

pub struct PlannerService {
    repository: FileSystemRepository,
}

impl PlannerService {
    pub fn new(repository: FileSystemRepository) -> Self {
        PlannerService { repository }
    }

    pub fn show(&self, date: NaiveDate) -> Result<DailyPlan> {
        let plans = self.repository.load::<DailyPlan>()?;
        Ok(DailyPlan::for_date(&plans, date))
    }

    /// Dates that have a stored plan, newest first
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        let mut dates: Vec<NaiveDate> = self
            .repository
            .load::<DailyPlan>()?
            .into_iter()
            .map(|p| p.date)
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        Ok(dates)
    }

    fn modify<R>(&self, date: NaiveDate, f: impl FnOnce(&mut DailyPlan) -> Result<R>) -> Result<R> {
        self.repository.update(|plans: &mut Vec<DailyPlan>| {
            let mut plan = DailyPlan::for_date(plans, date);
            let result = f(&mut plan)?;
            plan.save_into(plans);
            Ok(result)
        })
    }

    pub fn add_todo(&self, date: NaiveDate, text: &str) -> Result<TodoItem> {
        self.modify(date, |plan| {
            plan.add_todo(text).cloned().ok_or_else(|| {
                EmbedLinkError::InvalidInput("Todo text cannot be empty".to_string())
            })
        })
    }

    pub fn toggle_todo(&self, date: NaiveDate, id: &str) -> Result<DailyPlan> {
        self.modify(date, |plan| {
            if !plan.toggle_todo(id) {
                return Err(not_found("todo", id));
            }
            Ok(plan.clone())
        })
    }

    pub fn delete_todo(&self, date: NaiveDate, id: &str) -> Result<DailyPlan> {
        self.modify(date, |plan| {
            if !plan.delete_todo(id) {
                return Err(not_found("todo", id));
            }
            Ok(plan.clone())
        })
    }

    pub fn add_block(
        &self,
        date: NaiveDate,
        title: &str,
        start: &str,
        end: &str,
        kind: BlockType,
    ) -> Result<ScheduleBlock> {
        self.modify(date, |plan| {
            plan.add_block(title, start, end, kind)?
                .cloned()
                .ok_or_else(|| {
                    EmbedLinkError::InvalidInput("Block title cannot be empty".to_string())
                })
        })
    }

    pub fn delete_block(&self, date: NaiveDate, id: &str) -> Result<DailyPlan> {
        self.modify(date, |plan| {
            if !plan.delete_block(id) {
                return Err(not_found("schedule block", id));
            }
            Ok(plan.clone())
        })
    }

    pub fn set_summary(&self, date: NaiveDate, summary: &str) -> Result<DailyPlan> {
        self.modify(date, |plan| {
            plan.summary = summary.to_string();
            Ok(plan.clone())
        })
    }

    pub fn set_mood(&self, date: NaiveDate, mood: Mood) -> Result<DailyPlan> {
        self.modify(date, |plan| {
            plan.mood = mood;
            Ok(plan.clone())
        })
    }

    /// Generate a summary with Gemini and store it on the plan.
    pub fn generate_summary(&self, date: NaiveDate) -> Result<DailyPlan> {
        let plan = self.show(date)?;
        let config = self.repository.load_config()?;
        let summary = GeminiClient::from_env(&config.gemini_model)?.summarize_day(&plan)?;
        self.set_summary(date, &summary)
    }
}

fn not_found(what: &str, id: &str) -> EmbedLinkError {
    EmbedLinkError::NotFound(format!("{} '{}'", what, id))
}
