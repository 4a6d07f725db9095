// Gate Error Types
use thiserror::Error;

/// Errors raised at the edges of the gate: configuration, marker parsing and
/// scenario loading. Click handling itself never fails.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Invalid marker '{0}': expected 'tag:<name>', 'class:<name>', '.<class>' or '<tag>'")]
    InvalidMarker(String),

    #[error("Invalid node spec '{0}'")]
    InvalidNodeSpec(String),

    #[error("Unknown node '{0}' in scenario")]
    UnknownNode(String),

    #[error("Duplicate node id '{0}' in scenario")]
    DuplicateNode(String),

    #[error("Invalid auth state '{0}': expected loading, guest or member")]
    InvalidAuthState(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl GateError {
    pub fn invalid_marker(raw: impl Into<String>) -> Self {
        GateError::InvalidMarker(raw.into())
    }

    pub fn unknown_node(id: impl Into<String>) -> Self {
        GateError::UnknownNode(id.into())
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        GateError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type GateResult<T> = Result<T, GateError>;
