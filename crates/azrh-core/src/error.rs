//! Error taxonomy for azrh.
//!
//! Nothing in here is retried: every failure either resolves to a documented
//! fallback (a stale base-release reference keeps the catalog default) or
//! aborts the whole run. No partial release is ever submitted.

/// azrh domain and transport errors.
#[derive(Debug, thiserror::Error)]
pub enum AzrhError {
    /// A required identifier (project, org, token, definition) is absent.
    /// Raised before any remote call is made.
    #[error("configuration error: {0}")]
    Config(String),

    /// An artifact entry in remote data carries no alias. Malformed upstream
    /// data; fatal for the whole run.
    #[error("artifact entry without an alias in {context}")]
    MissingAlias { context: String },

    /// A release has no associated release definition, but one is required
    /// to compare it against the definition's live defaults.
    #[error("release {id} ({name}) has no associated release definition")]
    MissingDefinition { id: u32, name: String },

    /// The remote service answered with a non-success status.
    #[error("remote query failed with status {status}: {body}")]
    RemoteQuery { status: u16, body: String },

    /// Transport-level failure talking to the remote service.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operator aborted an interactive prompt, or the prompt itself
    /// failed. The run unwinds without submitting anything.
    #[error("interaction failed: {0}")]
    Interaction(String),
}

/// Result type for azrh operations.
pub type Result<T> = std::result::Result<T, AzrhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_alias_display() {
        let err = AzrhError::MissingAlias {
            context: "artifact versions query".to_string(),
        };
        assert!(err.to_string().contains("without an alias"));
        assert!(err.to_string().contains("artifact versions query"));
    }

    #[test]
    fn test_missing_definition_names_the_release() {
        let err = AzrhError::MissingDefinition {
            id: 2027,
            name: "Release-41".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2027"));
        assert!(msg.contains("Release-41"));
    }

    #[test]
    fn test_remote_query_carries_status_and_body() {
        let err = AzrhError::RemoteQuery {
            status: 404,
            body: "definition not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("definition not found"));
    }
}
