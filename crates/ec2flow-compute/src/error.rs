//! Compute facade error types

use thiserror::Error;

/// Errors surfaced by the compute facade
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    #[error("Key pair not found: {0}")]
    KeyPairNotFound(String),

    #[error("Security group not found: {0}")]
    SecurityGroupNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Error returned by the vendor API, passed through unchanged
    #[error("{operation} failed{}: {message}", code_suffix(.code))]
    Api {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("Pagination exceeded {0} pages")]
    PageLimit(usize),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl ComputeError {
    /// Vendor error code, if this error came from the API
    pub fn code(&self) -> Option<&str> {
        match self {
            ComputeError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ComputeError>;
