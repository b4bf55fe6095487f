//! Batch orchestration: resolve the project once, then walk the schedule
//! entry by entry, folding each outcome into a [`RunReport`].
//!
//! Only the pre-batch steps (project resolution, field discovery) can abort
//! a run. Every per-entry error is recorded and the batch moves on.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::fields::select_date_fields;
use crate::models::{
    DateFields, EntryOutcome, EntryRecord, FieldHandle, ItemHandle, ProjectHandle, RunOutcome,
    RunReport, UpdateOutcome,
};
use crate::repository::Repository;
use crate::schedule::{Schedule, ScheduleEntry};

/// Hooks the orchestrator reports progress through. Everything but the
/// confirmation has a no-op default.
pub trait SyncObserver {
    /// Asked once before any mutation. `false` cancels the run.
    fn confirm(&mut self, prompt: &str) -> bool;

    fn project_resolved(&mut self, _project: &ProjectHandle) {}

    fn fields_selected(&mut self, _fields: &DateFields) {}

    fn entry_started(&mut self, _entry: &ScheduleEntry, _dates: Option<(NaiveDate, NaiveDate)>) {}

    fn entry_finished(&mut self, _record: &EntryRecord) {}
}

pub struct Synchronizer<'a, R: Repository> {
    repo: &'a R,
    schedule: &'a Schedule,
}

impl<'a, R: Repository> Synchronizer<'a, R> {
    pub fn new(repo: &'a R, schedule: &'a Schedule) -> Self {
        Self { repo, schedule }
    }

    /// Resolves the project and lists its fields without choosing any.
    pub async fn discover(&self) -> Result<(ProjectHandle, Vec<FieldHandle>), CoreError> {
        let project = self.repo.resolve_project(self.schedule.project.number).await?;
        let fields = self.repo.discover_fields(&project).await?;
        Ok((project, fields))
    }

    /// Sets start and end dates on every scheduled issue.
    pub async fn sync_dates(&self, observer: &mut dyn SyncObserver) -> Result<RunOutcome, CoreError> {
        let project = self.repo.resolve_project(self.schedule.project.number).await?;
        observer.project_resolved(&project);

        let fields = self.repo.discover_fields(&project).await?;
        let selected = select_date_fields(&fields, &self.schedule.fields)?;
        observer.fields_selected(&selected);

        let (start_field, end_field) = match (&selected.start, &selected.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(CoreError::NoDateFields(selected.all.clone())),
        };

        let entries = self.schedule.entries();
        let prompt = format!(
            "Set dates on {} issue(s) in '{}'?",
            entries.len(),
            project.title
        );
        if !observer.confirm(&prompt) {
            tracing::info!("date run cancelled by operator");
            return Ok(RunOutcome::Cancelled);
        }

        let mut report = RunReport::default();
        for entry in &entries {
            let dates = entry.dates(self.schedule.base_date);
            observer.entry_started(entry, dates);

            let outcome = match dates {
                Some((start, end)) => {
                    self.apply_dates(&project, start_field, end_field, entry, start, end)
                        .await
                }
                None => EntryOutcome::Unscheduled,
            };

            let record = EntryRecord {
                task_id: entry.task_id.clone(),
                issue_number: entry.issue_number,
                start: dates.map(|d| d.0),
                end: dates.map(|d| d.1),
                outcome,
            };
            log_outcome(&record);
            observer.entry_finished(&record);
            report = report.record(record);
        }

        Ok(RunOutcome::Completed(report))
    }

    async fn locate(&self, project: &ProjectHandle, entry: &ScheduleEntry) -> Result<ItemHandle, CoreError> {
        let repo = &self.schedule.repository;
        let issue = self
            .repo
            .resolve_issue(&repo.owner, &repo.name, entry.issue_number)
            .await?;
        self.repo.locate_item(project, &issue).await?.ok_or_else(|| {
            CoreError::Precondition(format!(
                "issue #{} is not an item of project '{}'",
                entry.issue_number, project.title
            ))
        })
    }

    async fn apply_dates(
        &self,
        project: &ProjectHandle,
        start_field: &FieldHandle,
        end_field: &FieldHandle,
        entry: &ScheduleEntry,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EntryOutcome {
        let item = match self.locate(project, entry).await {
            Ok(item) => item,
            Err(e) => return EntryOutcome::Failed(e.to_string()),
        };

        let start_outcome = match self.repo.set_date(project, &item, start_field, start).await {
            Ok(outcome) => outcome,
            Err(e) => return EntryOutcome::Failed(format!("start date: {}", e)),
        };

        if end_field.id == start_field.id && end == start {
            return match start_outcome {
                UpdateOutcome::Applied => EntryOutcome::success(),
                UpdateOutcome::AlreadyApplied => EntryOutcome::AlreadyApplied,
            };
        }

        // The start date already landed, so an end-date failure only warns.
        match self.repo.set_date(project, &item, end_field, end).await {
            Ok(UpdateOutcome::AlreadyApplied) if start_outcome == UpdateOutcome::AlreadyApplied => {
                EntryOutcome::AlreadyApplied
            }
            Ok(_) => EntryOutcome::success(),
            Err(e) => EntryOutcome::Success {
                warning: Some(format!("end date not set: {}", e)),
            },
        }
    }

    /// Adds every mapped issue to the project.
    pub async fn add_items(&self, observer: &mut dyn SyncObserver) -> Result<RunOutcome, CoreError> {
        let project = self.repo.resolve_project(self.schedule.project.number).await?;
        observer.project_resolved(&project);

        let entries = self.schedule.entries();
        let prompt = format!(
            "Add {} issue(s) to '{}'?",
            entries.len(),
            project.title
        );
        if !observer.confirm(&prompt) {
            tracing::info!("add run cancelled by operator");
            return Ok(RunOutcome::Cancelled);
        }

        let repo = &self.schedule.repository;
        let mut report = RunReport::default();
        for entry in &entries {
            observer.entry_started(entry, None);

            let outcome = match self
                .repo
                .resolve_issue(&repo.owner, &repo.name, entry.issue_number)
                .await
            {
                Ok(issue) => match self.repo.add_item(&project, &issue).await {
                    Ok(UpdateOutcome::Applied) => EntryOutcome::success(),
                    Ok(UpdateOutcome::AlreadyApplied) => EntryOutcome::AlreadyApplied,
                    Err(e) => EntryOutcome::Failed(e.to_string()),
                },
                Err(e) => EntryOutcome::Failed(e.to_string()),
            };

            let record = EntryRecord {
                task_id: entry.task_id.clone(),
                issue_number: entry.issue_number,
                start: None,
                end: None,
                outcome,
            };
            log_outcome(&record);
            observer.entry_finished(&record);
            report = report.record(record);
        }

        Ok(RunOutcome::Completed(report))
    }
}

fn log_outcome(record: &EntryRecord) {
    match &record.outcome {
        EntryOutcome::Success { warning: None } => {
            tracing::info!(task = %record.task_id, issue = record.issue_number, "applied")
        }
        EntryOutcome::Success { warning: Some(w) } => {
            tracing::warn!(task = %record.task_id, issue = record.issue_number, warning = %w, "partially applied")
        }
        EntryOutcome::AlreadyApplied => {
            tracing::info!(task = %record.task_id, issue = record.issue_number, "already applied")
        }
        EntryOutcome::Unscheduled => {
            tracing::info!(task = %record.task_id, issue = record.issue_number, "no schedule")
        }
        EntryOutcome::Failed(reason) => {
            tracing::warn!(task = %record.task_id, issue = record.issue_number, %reason, "failed")
        }
    }
}
