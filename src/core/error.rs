//! Error types for the grade engine, session store and workflow

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or mutating the session store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be read or written
    #[error("Cannot access session store {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a valid session list
    #[error("Session store {} is corrupt and was left untouched: {source}", .path.display())]
    Corrupt {
        /// File involved
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: serde_json::Error,
    },

    /// Sessions could not be encoded as JSON
    #[error("Cannot serialize sessions: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Index past the end of the stored sessions
    #[error("No session number {} (store holds {len})", .index + 1)]
    IndexOutOfRange {
        /// Requested index, 0-based
        index: usize,
        /// Number of sessions
        len: usize,
    },

    /// Blank name on rename
    #[error("Session name cannot be empty")]
    EmptyName,
}

/// Rejected workflow transitions
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The action needs an active session
    #[error("No active session; start or load one first")]
    NoActiveSession,

    /// The action is only allowed with no active session
    #[error("Session '{0}' is already active; start a new session to discard it")]
    SessionActive(String),

    /// Blank session name
    #[error("Session name cannot be empty")]
    EmptySessionName,

    /// Blank subject name
    #[error("Subject name cannot be empty")]
    EmptySubjectName,

    /// Index past the end of the working subjects
    #[error("No subject number {} (session has {len})", .index + 1)]
    SubjectOutOfRange {
        /// Requested index, 0-based
        index: usize,
        /// Number of subjects
        len: usize,
    },

    /// Save attempted with no subjects
    #[error("Nothing to save; add at least one subject")]
    NoSubjects,

    /// Save attempted while some targets exceed 75
    #[error("Desired grade is unreachable for: {}", .0.join(", "))]
    UnreachableTarget(Vec<String>),

    /// Persisting the session failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures exporting a session report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Template rendering failed
    #[error("Failed to render report: {0}")]
    Render(#[from] askama::Error),

    /// The report file could not be written
    #[error("Failed to write report {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
