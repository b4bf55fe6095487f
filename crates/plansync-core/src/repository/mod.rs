use crate::error::CoreError;
use crate::gateway::{self, Gateway, GraphQlRequest};
use crate::models::{ContentHandle, FieldHandle, ItemHandle, ProjectHandle, UpdateOutcome};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod issues;
pub mod items;
pub mod projects;

/// Lookups scoped to the acting user's projects.
#[async_trait]
pub trait ProjectRepository {
    async fn resolve_project(&self, number: u64) -> Result<ProjectHandle, CoreError>;
    async fn discover_fields(&self, project: &ProjectHandle) -> Result<Vec<FieldHandle>, CoreError>;
}

#[async_trait]
pub trait IssueRepository {
    async fn resolve_issue(&self, owner: &str, name: &str, number: u64) -> Result<ContentHandle, CoreError>;
}

/// Project item lookups and mutations.
#[async_trait]
pub trait ItemRepository {
    async fn locate_item(&self, project: &ProjectHandle, content: &ContentHandle) -> Result<Option<ItemHandle>, CoreError>;
    async fn add_item(&self, project: &ProjectHandle, content: &ContentHandle) -> Result<UpdateOutcome, CoreError>;
    async fn set_date(&self, project: &ProjectHandle, item: &ItemHandle, field: &FieldHandle, date: NaiveDate) -> Result<UpdateOutcome, CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: ProjectRepository + IssueRepository + ItemRepository + Send + Sync {}

impl<T> Repository for T where T: ProjectRepository + IssueRepository + ItemRepository + Send + Sync {}

/// Repository backed by the GraphQL API through a [`Gateway`].
pub struct GraphQlRepository<G> {
    gateway: G,
}

impl<G: Gateway> GraphQlRepository<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Executes a request and decodes its `data` payload.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: GraphQlRequest) -> Result<T, CoreError> {
        let data = gateway::execute(&self.gateway, &request).await?;
        Ok(serde_json::from_value(data)?)
    }
}

// Wire shapes shared by the paginated connections.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<T> {
    pub page_info: Option<PageInfo>,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

impl<T> Connection<T> {
    /// Cursor of the next page, if the server reported one.
    pub fn next_cursor(&self) -> Option<String> {
        self.page_info
            .as_ref()
            .filter(|p| p.has_next_page)
            .and_then(|p| p.end_cursor.clone())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeResponse<T> {
    pub node: Option<T>,
}

/// Treats a mutation's "already"/"duplicate" error as an idempotent success.
pub(crate) fn idempotent<T>(result: Result<T, CoreError>) -> Result<UpdateOutcome, CoreError> {
    match result {
        Ok(_) => Ok(UpdateOutcome::Applied),
        Err(CoreError::AlreadyApplied(message)) => {
            tracing::debug!(%message, "mutation already applied");
            Ok(UpdateOutcome::AlreadyApplied)
        }
        Err(e) => Err(e),
    }
}

/// Replaces the server's wording of a NOT_FOUND error with our own message.
pub(crate) fn not_found_as<T>(result: Result<T, CoreError>, message: impl FnOnce() -> String) -> Result<T, CoreError> {
    match result {
        Err(CoreError::NotFound(detail)) => {
            tracing::debug!(%detail, "lookup not found");
            Err(CoreError::NotFound(message()))
        }
        other => other,
    }
}

/// Cursor for the next page. Stops when the server repeats the cursor it was
/// just given or reports more pages after an empty one.
pub(crate) fn advance_cursor(after: Option<&str>, next: Option<String>, page_len: usize) -> Option<String> {
    let cursor = next?;
    if page_len == 0 || after == Some(cursor.as_str()) {
        tracing::warn!(%cursor, page_len, "pagination made no progress; stopping");
        return None;
    }
    Some(cursor)
}
