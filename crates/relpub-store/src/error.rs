use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{operation} failed for '{key}': {details}")]
    Request {
        operation: StoreOperation,
        key: String,
        details: String,
    },

    #[error("failed to read '{}' ({kind}): {message}", .path.display())]
    Io {
        path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    #[error("list")]
    List,
    #[error("upload")]
    Upload,
    #[error("delete")]
    Delete,
}

impl StoreError {
    pub fn request(operation: StoreOperation, key: &str, details: impl Into<String>) -> Self {
        Self::Request {
            operation,
            key: key.to_string(),
            details: details.into(),
        }
    }

    pub fn request_from<E>(operation: StoreOperation, key: &str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::request(operation, key, error.to_string())
    }

    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Credentials are absent. Callers treat this as "skip the phase".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("{0} env variable not set")]
    MissingVariable(String),
}
