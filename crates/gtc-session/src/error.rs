use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("authentication token is required for conference sessions")]
    Authentication,
    #[error("unexpected response shape: {0}")]
    DataShape(String),
    #[error("no flavor profiles available")]
    EmptyCatalog,
    #[error("probe error: {0}")]
    Probe(String),
    #[error("download tool exited with code {code}")]
    ToolExecution { code: i32 },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        SessionError::DataShape(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
