use thiserror::Error;

use crate::models::FieldHandle;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Gateway command failed: {0}")]
    Transport(String),

    #[error("Malformed gateway response")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Missing token scopes: {0}")]
    AuthScope(String),

    #[error("Already applied: {0}")]
    AlreadyApplied(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("No DATE field found among {} project field(s)", .0.len())]
    NoDateFields(Vec<FieldHandle>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Classifies a GraphQL error by its `type` code, falling back to the
    /// message text when the code is absent or unrecognised.
    pub fn from_graphql_error(kind: Option<&str>, message: &str) -> Self {
        match kind {
            Some("NOT_FOUND") => CoreError::NotFound(message.to_string()),
            Some("INSUFFICIENT_SCOPES") => CoreError::AuthScope(message.to_string()),
            _ => Self::from_graphql_message(message),
        }
    }

    /// Classifies the first message of a GraphQL `errors` array.
    pub fn from_graphql_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if message.contains("INSUFFICIENT_SCOPES") || lower.contains("scopes") {
            CoreError::AuthScope(message.to_string())
        } else if lower.contains("already") || lower.contains("duplicate") {
            CoreError::AlreadyApplied(message.to_string())
        } else {
            CoreError::GraphQl(message.to_string())
        }
    }

    /// Whether the CLI should suggest re-authorizing `gh` with project scopes.
    pub fn needs_scope_refresh(&self) -> bool {
        matches!(self, CoreError::AuthScope(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Your token has not been granted the required scopes to execute this query.")]
    #[case("INSUFFICIENT_SCOPES: read:project")]
    fn test_scope_messages_are_auth_errors(#[case] message: &str) {
        assert!(matches!(
            CoreError::from_graphql_message(message),
            CoreError::AuthScope(_)
        ));
    }

    #[rstest]
    #[case("Content already exists in this project")]
    #[case("Duplicate item")]
    #[case("ALREADY set")]
    fn test_already_messages_are_idempotent(#[case] message: &str) {
        assert!(matches!(
            CoreError::from_graphql_message(message),
            CoreError::AlreadyApplied(_)
        ));
    }

    #[rstest]
    #[case("Could not resolve to a ProjectV2 with the number 99.")]
    #[case("Could not resolve to an Issue with the number of 999.")]
    fn test_not_found_type_is_not_found(#[case] message: &str) {
        match CoreError::from_graphql_error(Some("NOT_FOUND"), message) {
            CoreError::NotFound(msg) => assert_eq!(msg, message),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_untyped_errors_fall_back_to_message() {
        assert!(matches!(
            CoreError::from_graphql_error(None, "Content already exists in this project"),
            CoreError::AlreadyApplied(_)
        ));
        assert!(matches!(
            CoreError::from_graphql_error(Some("UNPROCESSABLE"), "Something broke"),
            CoreError::GraphQl(_)
        ));
    }

    #[test]
    fn test_other_messages_propagate_verbatim() {
        match CoreError::from_graphql_message("Could not resolve to a node with the global id") {
            CoreError::GraphQl(msg) => {
                assert_eq!(msg, "Could not resolve to a node with the global id")
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}
