use crate::error::CoreError;
use crate::gateway::{Gateway, GraphQlRequest};
use crate::models::{ContentHandle, FieldHandle, ItemHandle, ProjectHandle, UpdateOutcome};
use crate::queries::{self, ITEMS_PAGE_SIZE};
use crate::repository::{advance_cursor, idempotent, Connection, GraphQlRepository, NodeResponse};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ItemsNode {
    items: Option<Connection<ItemNode>>,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    id: String,
    // Null for redacted content, `{}` for drafts and pull requests.
    content: Option<ContentRef>,
}

#[derive(Debug, Deserialize)]
struct ContentRef {
    id: Option<String>,
}

#[async_trait]
impl<G: Gateway> super::ItemRepository for GraphQlRepository<G> {
    async fn locate_item(&self, project: &ProjectHandle, content: &ContentHandle) -> Result<Option<ItemHandle>, CoreError> {
        let mut after: Option<String> = None;
        let mut scanned = 0usize;

        loop {
            let request = GraphQlRequest::new(queries::PROJECT_ITEMS)
                .var("projectId", project.id.as_str())
                .var("first", ITEMS_PAGE_SIZE)
                .var("after", after.clone());
            let data: NodeResponse<ItemsNode> = self.fetch(request).await?;

            let connection = data
                .node
                .and_then(|n| n.items)
                .ok_or_else(|| CoreError::NotFound(format!("Project '{}' returned no item list", project.title)))?;

            let next = advance_cursor(after.as_deref(), connection.next_cursor(), connection.nodes.len());
            for item in connection.nodes.into_iter().flatten() {
                scanned += 1;
                let content_id = item.content.and_then(|c| c.id);
                if content_id.as_deref() == Some(content.id.as_str()) {
                    return Ok(Some(ItemHandle {
                        id: item.id,
                        content_id: content.id.clone(),
                    }));
                }
            }

            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        tracing::debug!(scanned, issue = content.number, "no project item wraps the issue");
        Ok(None)
    }

    async fn add_item(&self, project: &ProjectHandle, content: &ContentHandle) -> Result<UpdateOutcome, CoreError> {
        let request = GraphQlRequest::new(queries::ADD_ITEM)
            .var("projectId", project.id.as_str())
            .var("contentId", content.id.as_str());
        idempotent(self.fetch::<Value>(request).await)
    }

    async fn set_date(&self, project: &ProjectHandle, item: &ItemHandle, field: &FieldHandle, date: NaiveDate) -> Result<UpdateOutcome, CoreError> {
        let request = GraphQlRequest::new(queries::SET_DATE)
            .var("projectId", project.id.as_str())
            .var("itemId", item.id.as_str())
            .var("fieldId", field.id.as_str())
            .var("date", date.format("%Y-%m-%d").to_string());
        idempotent(self.fetch::<Value>(request).await)
    }
}
