use async_trait::async_trait;
use chrono::NaiveDate;
use plansync_core::error::CoreError;
use plansync_core::fields::FieldRoles;
use plansync_core::gateway::{Gateway, GatewayOutput, GraphQlRequest};
use plansync_core::models::{EntryRecord, ProjectHandle};
use plansync_core::schedule::{DayRange, ProjectRef, RepositoryRef, Schedule, ScheduleEntry};
use plansync_core::sync::SyncObserver;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// In-memory stand-in for a GitHub project board, answering the gateway's
/// GraphQL operations the way `gh api graphql` would.
#[derive(Default)]
pub struct FakeBoard {
    pub project: Option<(String, String)>,
    pub project_error: Option<String>,
    /// (id, name, dataType)
    pub fields: Vec<(String, String, String)>,
    /// issue number -> issue node id
    pub issues: HashMap<u64, String>,
    /// (item id, content id)
    pub items: Vec<(String, Option<String>)>,
    /// content ids already on the board
    pub already_added: HashSet<String>,
    /// field id -> error message returned when setting it
    pub field_errors: HashMap<String, String>,
    /// answer every items page with the cursor it was asked for
    pub stalled_items: bool,
    pub calls: Mutex<Vec<GraphQlRequest>>,
}

impl FakeBoard {
    /// A board titled "Roadmap" with "Start date"/"End date" fields.
    pub fn roadmap() -> Self {
        Self {
            project: Some(("PVT_1".to_string(), "Roadmap".to_string())),
            fields: vec![
                field("PVTF_title", "Title", "TITLE"),
                field("PVTF_status", "Status", "SINGLE_SELECT"),
                field("PVTF_start", "Start date", "DATE"),
                field("PVTF_end", "End date", "DATE"),
            ],
            ..Default::default()
        }
    }

    /// Registers an issue and wraps it in a project item.
    pub fn with_issue(mut self, number: u64) -> Self {
        let issue_id = format!("I_{}", number);
        self.issues.insert(number, issue_id.clone());
        self.items.push((format!("PVTI_{}", number), Some(issue_id)));
        self
    }

    pub fn calls(&self) -> Vec<GraphQlRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<GraphQlRequest> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation() == operation)
            .collect()
    }

    fn page<T: Clone>(items: &[T], request: &GraphQlRequest) -> (Vec<T>, bool, Option<String>) {
        let first = request.variables["first"].as_u64().unwrap() as usize;
        let offset = request
            .str_var("after")
            .map(|c| c.parse::<usize>().unwrap())
            .unwrap_or(0);
        let end = (offset + first).min(items.len());
        let has_next = end < items.len();
        (items[offset..end].to_vec(), has_next, Some(end.to_string()))
    }

    fn respond(&self, request: &GraphQlRequest) -> Value {
        match request.operation() {
            "ViewerProject" => {
                match &self.project {
                    Some((id, title)) => {
                        json!({ "data": { "viewer": { "projectV2": { "id": id, "title": title } } } })
                    }
                    None => not_found(
                        json!({ "viewer": { "projectV2": null } }),
                        &["viewer", "projectV2"],
                        format!(
                            "Could not resolve to a ProjectV2 with the number {}.",
                            request.variables["number"]
                        ),
                    ),
                }
            }
            "ProjectFields" => {
                let (page, has_next, cursor) = Self::page(&self.fields, request);
                let nodes: Vec<Value> = page
                    .into_iter()
                    .map(|(id, name, kind)| json!({ "id": id, "name": name, "dataType": kind }))
                    .collect();
                json!({ "data": { "node": { "fields": {
                    "pageInfo": { "hasNextPage": has_next, "endCursor": cursor },
                    "nodes": nodes
                } } } })
            }
            "Issue" => {
                let number = request.variables["number"].as_u64().unwrap();
                match self.issues.get(&number) {
                    Some(id) => json!({ "data": { "repository": { "issue": {
                        "id": id, "title": format!("Issue {}", number)
                    } } } }),
                    None => not_found(
                        json!({ "repository": { "issue": null } }),
                        &["repository", "issue"],
                        format!("Could not resolve to an Issue with the number of {}.", number),
                    ),
                }
            }
            "ProjectItems" => {
                let (page, mut has_next, mut cursor) = Self::page(&self.items, request);
                if self.stalled_items {
                    has_next = true;
                    cursor = Some(request.str_var("after").unwrap_or("0").to_string());
                }
                let nodes: Vec<Value> = page
                    .into_iter()
                    .map(|(id, content)| match content {
                        Some(content_id) => json!({ "id": id, "content": { "id": content_id } }),
                        None => json!({ "id": id, "content": {} }),
                    })
                    .collect();
                json!({ "data": { "node": { "items": {
                    "pageInfo": { "hasNextPage": has_next, "endCursor": cursor },
                    "nodes": nodes
                } } } })
            }
            "AddItem" => {
                let content_id = request.str_var("contentId").unwrap();
                if self.already_added.contains(content_id) {
                    json!({ "errors": [{ "message": "Content already exists in this project" }] })
                } else {
                    json!({ "data": { "addProjectV2ItemById": { "item": { "id": "PVTI_new" } } } })
                }
            }
            "SetDate" => {
                let field_id = request.str_var("fieldId").unwrap();
                match self.field_errors.get(field_id) {
                    Some(message) => json!({ "errors": [{ "message": message }] }),
                    None => json!({ "data": { "updateProjectV2ItemFieldValue": {
                        "projectV2Item": { "id": request.str_var("itemId") }
                    } } }),
                }
            }
            other => panic!("unexpected operation {}", other),
        }
    }
}

#[async_trait]
impl Gateway for FakeBoard {
    async fn invoke(&self, request: &GraphQlRequest) -> Result<GatewayOutput, CoreError> {
        self.calls.lock().unwrap().push(request.clone());

        if request.operation() == "ViewerProject" {
            if let Some(message) = &self.project_error {
                return Ok(GatewayOutput {
                    success: false,
                    stdout: json!({ "errors": [{ "message": message }] }).to_string(),
                    stderr: "gh: GraphQL error".to_string(),
                });
            }
        }

        let body = self.respond(request);
        let success = body.get("errors").is_none();
        Ok(GatewayOutput {
            success,
            stdout: body.to_string(),
            stderr: String::new(),
        })
    }
}

/// GitHub's answer for a missing object: null data plus a typed error.
fn not_found(data: Value, path: &[&str], message: String) -> Value {
    json!({
        "data": data,
        "errors": [{ "type": "NOT_FOUND", "path": path, "message": message }]
    })
}

pub fn field(id: &str, name: &str, kind: &str) -> (String, String, String) {
    (id.to_string(), name.to_string(), kind.to_string())
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builds a schedule directly, without document validation.
pub fn schedule(base: &str, issues: &[(&str, u64)], days: &[(&str, u32, u32)]) -> Schedule {
    Schedule {
        base_date: date(base),
        repository: RepositoryRef {
            owner: "octo".to_string(),
            name: "roadmap".to_string(),
        },
        project: ProjectRef { number: 5 },
        fields: FieldRoles::default(),
        issues: issues
            .iter()
            .map(|(task, number)| (task.to_string(), *number))
            .collect::<BTreeMap<_, _>>(),
        schedule: days
            .iter()
            .map(|(task, start, end)| {
                (
                    task.to_string(),
                    DayRange {
                        start_day: *start,
                        end_day: *end,
                    },
                )
            })
            .collect(),
    }
}

/// Observer with a scripted answer that records what it was told.
pub struct RecordingObserver {
    pub answer: bool,
    pub prompts: Vec<String>,
    pub project: Option<ProjectHandle>,
    pub started: Vec<u64>,
    pub finished: Vec<EntryRecord>,
}

impl RecordingObserver {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
            project: None,
            started: Vec::new(),
            finished: Vec::new(),
        }
    }
}

impl SyncObserver for RecordingObserver {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }

    fn project_resolved(&mut self, project: &ProjectHandle) {
        self.project = Some(project.clone());
    }

    fn entry_started(&mut self, entry: &ScheduleEntry, _dates: Option<(NaiveDate, NaiveDate)>) {
        self.started.push(entry.issue_number);
    }

    fn entry_finished(&mut self, record: &EntryRecord) {
        self.finished.push(record.clone());
    }
}
