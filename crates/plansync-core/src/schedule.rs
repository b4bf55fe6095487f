//! The schedule document: which issues belong to the roadmap and when each
//! one starts and ends, expressed as day offsets from a base date.

use chrono::{Duration, NaiveDate};
use figment::providers::{Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::CoreError;
use crate::fields::FieldRoles;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub number: u64,
}

/// Inclusive range of schedule days. Day 1 is the base date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct DayRange {
    pub start_day: u32,
    pub end_day: u32,
}

impl From<(u32, u32)> for DayRange {
    fn from((start_day, end_day): (u32, u32)) -> Self {
        Self { start_day, end_day }
    }
}

impl From<DayRange> for (u32, u32) {
    fn from(range: DayRange) -> Self {
        (range.start_day, range.end_day)
    }
}

/// Calendar date of a schedule day. `None` when the date is out of range.
pub fn day_to_date(base: NaiveDate, day: u32) -> Option<NaiveDate> {
    base.checked_add_signed(Duration::days(i64::from(day) - 1))
}

/// One row of the issue mapping, joined with its schedule if it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub task_id: String,
    pub issue_number: u64,
    pub days: Option<DayRange>,
}

impl ScheduleEntry {
    pub fn dates(&self, base: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let days = self.days?;
        Some((day_to_date(base, days.start_day)?, day_to_date(base, days.end_day)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub base_date: NaiveDate,
    pub repository: RepositoryRef,
    pub project: ProjectRef,
    #[serde(default)]
    pub fields: FieldRoles,
    /// Task id -> issue number.
    #[serde(default)]
    pub issues: BTreeMap<String, u64>,
    /// Task id -> [start_day, end_day].
    #[serde(default)]
    pub schedule: BTreeMap<String, DayRange>,
}

impl Schedule {
    /// Loads and validates a schedule document from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.is_file() {
            return Err(CoreError::NotFound(format!(
                "Schedule document '{}' does not exist",
                path.display()
            )));
        }
        Self::from_figment(Figment::new().merge(Toml::file(path)))
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CoreError> {
        Self::from_figment(Figment::new().merge(Toml::string(source)))
    }

    fn from_figment(figment: Figment) -> Result<Self, CoreError> {
        let schedule: Schedule = figment
            .extract()
            .map_err(|e| CoreError::InvalidInput(format!("Schedule document: {}", e)))?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks the document's invariants, reporting every violation at once.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut problems = Vec::new();

        if self.repository.owner.trim().is_empty() || self.repository.name.trim().is_empty() {
            problems.push("repository owner and name must not be empty".to_string());
        }
        if self.project.number == 0 {
            problems.push("project number must be positive".to_string());
        }

        let mut seen: HashMap<u64, &str> = HashMap::new();
        for (task_id, &number) in &self.issues {
            if !is_valid_task_id(task_id) {
                problems.push(format!("task id '{}' does not match PREFIX-CATEGORY-NNN", task_id));
            }
            if number == 0 {
                problems.push(format!("task '{}' maps to issue #0", task_id));
            } else if let Some(other) = seen.insert(number, task_id) {
                problems.push(format!("issue #{} is mapped by both '{}' and '{}'", number, other, task_id));
            }
        }

        for (task_id, days) in &self.schedule {
            if !self.issues.contains_key(task_id) {
                problems.push(format!("scheduled task '{}' has no issue mapping", task_id));
            }
            if days.start_day > days.end_day {
                problems.push(format!(
                    "task '{}' starts on day {} after it ends on day {}",
                    task_id, days.start_day, days.end_day
                ));
            }
            if day_to_date(self.base_date, days.end_day).is_none() {
                problems.push(format!("task '{}' ends beyond the supported calendar", task_id));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(problems.join("; ")))
        }
    }

    /// Every mapped issue in ascending issue-number order.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        let mut entries: Vec<ScheduleEntry> = self
            .issues
            .iter()
            .map(|(task_id, &issue_number)| ScheduleEntry {
                task_id: task_id.clone(),
                issue_number,
                days: self.schedule.get(task_id).copied(),
            })
            .collect();
        entries.sort_by_key(|e| e.issue_number);
        entries
    }

    pub fn project_url(&self) -> String {
        crate::models::project_url(&self.repository.owner, self.project.number)
    }
}

/// `PREFIX-CATEGORY-NNN`: at least three non-empty dash-separated segments,
/// the last one all digits.
pub fn is_valid_task_id(task_id: &str) -> bool {
    let segments: Vec<&str> = task_id.split('-').collect();
    segments.len() >= 3
        && segments.iter().all(|s| !s.is_empty())
        && segments
            .last()
            .is_some_and(|last| last.chars().all(|c| c.is_ascii_digit()))
}
