//! GraphQL documents sent through the gateway. Every value is a bound
//! variable; nothing is interpolated into the document text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub operation: &'static str,
    pub text: &'static str,
}

/// Page size of the fields connection.
pub const FIELDS_PAGE_SIZE: u32 = 20;
/// Page size of the items connection.
pub const ITEMS_PAGE_SIZE: u32 = 100;

pub const VIEWER_PROJECT: Document = Document {
    operation: "ViewerProject",
    text: r#"query ViewerProject($number: Int!) {
  viewer {
    projectV2(number: $number) {
      id
      title
    }
  }
}"#,
};

pub const PROJECT_FIELDS: Document = Document {
    operation: "ProjectFields",
    text: r#"query ProjectFields($projectId: ID!, $first: Int!, $after: String) {
  node(id: $projectId) {
    ... on ProjectV2 {
      fields(first: $first, after: $after) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          ... on ProjectV2Field {
            id
            name
            dataType
          }
          ... on ProjectV2IterationField {
            id
            name
            dataType
          }
          ... on ProjectV2SingleSelectField {
            id
            name
            dataType
          }
        }
      }
    }
  }
}"#,
};

pub const ISSUE: Document = Document {
    operation: "Issue",
    text: r#"query Issue($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    issue(number: $number) {
      id
      title
    }
  }
}"#,
};

pub const PROJECT_ITEMS: Document = Document {
    operation: "ProjectItems",
    text: r#"query ProjectItems($projectId: ID!, $first: Int!, $after: String) {
  node(id: $projectId) {
    ... on ProjectV2 {
      items(first: $first, after: $after) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          id
          content {
            ... on Issue {
              id
            }
          }
        }
      }
    }
  }
}"#,
};

pub const ADD_ITEM: Document = Document {
    operation: "AddItem",
    text: r#"mutation AddItem($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
    item {
      id
    }
  }
}"#,
};

pub const SET_DATE: Document = Document {
    operation: "SetDate",
    text: r#"mutation SetDate($projectId: ID!, $itemId: ID!, $fieldId: ID!, $date: Date!) {
  updateProjectV2ItemFieldValue(
    input: {projectId: $projectId, itemId: $itemId, fieldId: $fieldId, value: {date: $date}}
  ) {
    projectV2Item {
      id
    }
  }
}"#,
};
