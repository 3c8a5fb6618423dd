use async_openai::error::OpenAIError;
use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),
    #[error("Upstream rejected the request: {0}")]
    UpstreamRejected(String),
    #[error("Upstream rate limited: {0}")]
    UpstreamRateLimited(String),
    #[error("Upstream transient failure: {0}")]
    UpstreamTransient(String),
    #[error("Upstream unavailable after {attempts} attempts: {message}")]
    UpstreamUnavailable { attempts: u32, message: String },
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),
    #[error("Deadline exceeded after {0} seconds")]
    DeadlineExceeded(u64),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] surrealdb::Error),
    #[error("OpenAI error: {0}")]
    OpenAI(#[from] OpenAIError),
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Whether the error is expected to resolve on retry. Only these kinds
    /// consume retry budget in the generation client.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::UpstreamRateLimited(_) | Self::UpstreamTransient(_)
        )
    }
}
