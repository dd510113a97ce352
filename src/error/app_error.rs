use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    RequestFailed(String),
    ConfigError(String),
    InternalError(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::RequestFailed(msg)
            | AppError::ConfigError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }
}

// Display carries the message verbatim; callers surface it to the UI as-is.
impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("Serialization failed: {}", err))
    }
}
