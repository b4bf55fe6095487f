use crate::error::CoreError;
use crate::gateway::{Gateway, GraphQlRequest};
use crate::models::ContentHandle;
use crate::queries;
use crate::repository::{not_found_as, GraphQlRepository};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    issue: Option<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    id: String,
    title: String,
}

#[async_trait]
impl<G: Gateway> super::IssueRepository for GraphQlRepository<G> {
    async fn resolve_issue(&self, owner: &str, name: &str, number: u64) -> Result<ContentHandle, CoreError> {
        let request = GraphQlRequest::new(queries::ISSUE)
            .var("owner", owner)
            .var("name", name)
            .var("number", number);
        let missing = || format!("Issue #{} not found in {}/{}", number, owner, name);
        let data: RepositoryData = not_found_as(self.fetch(request).await, missing)?;

        let issue = data
            .repository
            .and_then(|r| r.issue)
            .ok_or_else(|| CoreError::NotFound(missing()))?;

        Ok(ContentHandle {
            id: issue.id,
            title: issue.title,
            number,
        })
    }
}
