use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A project board owned by the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHandle {
    pub id: String,
    pub title: String,
    pub number: u64,
}

impl ProjectHandle {
    /// Web view of a user-owned project.
    pub fn url(&self, owner: &str) -> String {
        project_url(owner, self.number)
    }
}

pub fn project_url(owner: &str, number: u64) -> String {
    format!("https://github.com/users/{}/projects/{}", owner, number)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Date,
    SingleSelect,
    Iteration,
    Other(String),
}

impl From<String> for FieldKind {
    fn from(data_type: String) -> Self {
        match data_type.as_str() {
            "DATE" => FieldKind::Date,
            "SINGLE_SELECT" => FieldKind::SingleSelect,
            "ITERATION" => FieldKind::Iteration,
            _ => FieldKind::Other(data_type),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Date => write!(f, "DATE"),
            FieldKind::SingleSelect => write!(f, "SINGLE_SELECT"),
            FieldKind::Iteration => write!(f, "ITERATION"),
            FieldKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A typed custom field of a project. Plain, iteration and single-select
/// field shapes all collapse into this one handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldHandle {
    pub id: String,
    pub name: String,
    #[serde(rename = "dataType")]
    pub kind: FieldKind,
}

impl FieldHandle {
    pub fn is_date(&self) -> bool {
        self.kind == FieldKind::Date
    }
}

impl fmt::Display for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// The fields chosen to carry start and end dates.
#[derive(Debug, Clone, Default)]
pub struct DateFields {
    pub start: Option<FieldHandle>,
    pub end: Option<FieldHandle>,
    pub all: Vec<FieldHandle>,
}

/// An issue resolved to its node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHandle {
    pub id: String,
    pub title: String,
    pub number: u64,
}

/// The binding of a piece of content into a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemHandle {
    pub id: String,
    pub content_id: String,
}

/// Result of a mutation the API cannot check in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    AlreadyApplied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Applied. `warning` carries a best-effort failure (end date) that
    /// did not fail the entry.
    Success { warning: Option<String> },
    AlreadyApplied,
    /// Present in the issue mapping but absent from the schedule.
    Unscheduled,
    Failed(String),
}

impl EntryOutcome {
    pub fn success() -> Self {
        EntryOutcome::Success { warning: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub task_id: String,
    pub issue_number: u64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub outcome: EntryOutcome,
}

/// Per-run accumulator, folded over entry records and returned as the
/// final immutable report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub records: Vec<EntryRecord>,
    pub success: usize,
    pub skipped: usize,
    pub unscheduled: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn record(mut self, record: EntryRecord) -> Self {
        match record.outcome {
            EntryOutcome::Success { .. } => self.success += 1,
            EntryOutcome::AlreadyApplied => self.skipped += 1,
            EntryOutcome::Unscheduled => self.unscheduled += 1,
            EntryOutcome::Failed(_) => self.failed += 1,
        }
        self.records.push(record);
        self
    }

    pub fn warnings(&self) -> impl Iterator<Item = (&EntryRecord, &str)> {
        self.records.iter().filter_map(|r| match &r.outcome {
            EntryOutcome::Success { warning: Some(w) } => Some((r, w.as_str())),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl FromIterator<EntryRecord> for RunReport {
    fn from_iter<I: IntoIterator<Item = EntryRecord>>(iter: I) -> Self {
        iter.into_iter().fold(RunReport::default(), RunReport::record)
    }
}

/// How a batch run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunReport),
    /// The operator declined the confirmation prompt. Nothing was mutated.
    Cancelled,
}
