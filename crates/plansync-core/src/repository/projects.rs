use crate::error::CoreError;
use crate::gateway::{Gateway, GraphQlRequest};
use crate::models::{FieldHandle, FieldKind, ProjectHandle};
use crate::queries::{self, FIELDS_PAGE_SIZE};
use crate::repository::{advance_cursor, not_found_as, Connection, GraphQlRepository, NodeResponse};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Option<Viewer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Viewer {
    project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct FieldsNode {
    fields: Option<Connection<FieldNode>>,
}

// Field types outside the three queried fragments come back as `{}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldNode {
    id: Option<String>,
    name: Option<String>,
    data_type: Option<String>,
}

impl FieldNode {
    fn into_handle(self) -> Option<FieldHandle> {
        Some(FieldHandle {
            id: self.id?,
            name: self.name.unwrap_or_default(),
            kind: FieldKind::from(self.data_type.unwrap_or_default()),
        })
    }
}

#[async_trait]
impl<G: Gateway> super::ProjectRepository for GraphQlRepository<G> {
    async fn resolve_project(&self, number: u64) -> Result<ProjectHandle, CoreError> {
        let request = GraphQlRequest::new(queries::VIEWER_PROJECT).var("number", number);
        let missing = || format!("Project #{} not found for the current user", number);
        let data: ViewerData = not_found_as(self.fetch(request).await, missing)?;

        let project = data
            .viewer
            .and_then(|v| v.project_v2)
            .ok_or_else(|| CoreError::NotFound(missing()))?;

        tracing::info!(number, title = %project.title, "project resolved");
        Ok(ProjectHandle {
            id: project.id,
            title: project.title,
            number,
        })
    }

    async fn discover_fields(&self, project: &ProjectHandle) -> Result<Vec<FieldHandle>, CoreError> {
        let mut fields = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let request = GraphQlRequest::new(queries::PROJECT_FIELDS)
                .var("projectId", project.id.as_str())
                .var("first", FIELDS_PAGE_SIZE)
                .var("after", after.clone());
            let data: NodeResponse<FieldsNode> = self.fetch(request).await?;

            let connection = data
                .node
                .and_then(|n| n.fields)
                .ok_or_else(|| CoreError::NotFound(format!("Project '{}' returned no field list", project.title)))?;

            let next = advance_cursor(after.as_deref(), connection.next_cursor(), connection.nodes.len());
            fields.extend(connection.nodes.into_iter().flatten().filter_map(FieldNode::into_handle));

            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        tracing::debug!(count = fields.len(), "project fields discovered");
        Ok(fields)
    }
}
