use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole workflow operation.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(String),

    #[error("rename was not confirmed")]
    Cancelled,

    #[error("could not list {path:?}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WorkflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        WorkflowError::Validation(msg.into())
    }
}

/// Failure of a single translation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("authentication rejected by provider")]
    Auth,

    #[error("translation quota exceeded")]
    Quota,

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected provider response: {0}")]
    Response(String),

    #[error("provider returned an empty translation")]
    EmptyTranslation,

    #[error("translation is not a usable file name: {0:?}")]
    InvalidName(String),

    #[error("name is not valid UTF-8 and cannot be translated")]
    UndecodableName,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Response(err.to_string())
    }
}

/// Failure of a single rename.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileSystemError {
    #[error("target already exists")]
    AlreadyExists,

    #[error("permission denied")]
    PermissionDenied,

    #[error("source not found")]
    SourceNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<io::Error> for FileSystemError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::AlreadyExists => FileSystemError::AlreadyExists,
            io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied,
            io::ErrorKind::NotFound => FileSystemError::SourceNotFound,
            _ => FileSystemError::Other(err.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    #[error("translation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("rename failed: {0}")]
    FileSystem(#[from] FileSystemError),
}

/// A per-item failure collected during a batch, tagged with the offending name.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub name: String,
    pub error: ItemError,
}

impl ItemFailure {
    pub fn new(name: impl Into<String>, error: impl Into<ItemError>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
        }
    }
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}': {}", self.name, self.error)
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
