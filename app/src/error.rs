use garden_core::error::TimeFormatError;
use thiserror::Error;
use warp::http::StatusCode;

#[derive(Debug, Error)]
pub enum DBError {
    #[error(transparent)]
    SQLError(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Stored document is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Document {1} already exists in {0}")]
    Duplicate(std::string::String, std::string::String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {0}: {1}")]
    Invalid(&'static str, std::string::String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(std::string::String),
    #[error("Invalid time format")]
    InvalidTime(#[from] TimeFormatError),
    #[error("{0}")]
    EmptyWindow(std::string::String),
    #[error("{0}")]
    Conflict(std::string::String),
    #[error(transparent)]
    Internal(DBError),
}

impl ServiceError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        ServiceError::NotFound(format!("{} with ID {} not found", kind, id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) | ServiceError::EmptyWindow(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidTime(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Internal(_))
    }
}

impl From<DBError> for ServiceError {
    fn from(err: DBError) -> Self {
        match err {
            DBError::Duplicate(_, _) => ServiceError::Conflict(err.to_string()),
            _ => ServiceError::Internal(err),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Internal(DBError::Parse(err))
    }
}
