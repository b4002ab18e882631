use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no node at path {0}")]
    NotFound(String),

    #[error("duplicate node id {0}")]
    DuplicateId(String),

    #[error("duplicate node path {0}")]
    DuplicatePath(String),

    #[error("invalid node name {name:?} under {parent:?}")]
    InvalidName { parent: String, name: String },
}

/// Any failure reported by a text-completion backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("response contained no text")]
    EmptyResponse,

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("assistant task failed: {0}")]
    TaskFailed(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Network(err.to_string())
    }
}

/// Operation invoked in a state the UI never offers it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("no file is open")]
    NoActiveFile,

    #[error("the open file has no content")]
    EmptyContent,

    #[error("an analysis is already running for the open file")]
    AnalysisInFlight,

    #[error("message is blank")]
    BlankMessage,

    #[error("waiting for the previous reply")]
    ExchangeInFlight,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("embedded project is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("embedded project is not a valid tree: {0}")]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = CompletionError::Api {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: quota exceeded");
    }

    #[test]
    fn fixture_error_wraps_tree_error() {
        let err = FixtureError::from(TreeError::DuplicateId("root".to_string()));
        assert_eq!(
            err.to_string(),
            "embedded project is not a valid tree: duplicate node id root"
        );
    }
}
