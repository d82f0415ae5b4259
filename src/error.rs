use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchoolError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    BadParams(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SchoolError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        SchoolError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Error code reported over IPC.
    pub fn code(&self) -> &'static str {
        match self {
            SchoolError::NotFound { .. } => "not_found",
            SchoolError::BadParams(_) => "bad_params",
            SchoolError::Storage(_) | SchoolError::Encode(_) => "store_write_failed",
        }
    }
}

pub type SchoolResult<T> = Result<T, SchoolError>;
