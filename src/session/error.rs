//! Session error and outcome types.

use thiserror::Error;

use crate::backend::BackendError;

/// Result type for operations whose failure the caller must see.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The schema could not be reflected while establishing a session.
    #[error("could not connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: BackendError,
    },

    /// Refreshing the table list failed.
    #[error("schema error: {0}")]
    Schema(#[source] BackendError),

    /// The engine failed to run a report.
    #[error("report failed: {0}")]
    Execution(#[source] BackendError),

    /// An operation needed a session and there is none.
    #[error("no database connected")]
    NotConnected,
}

/// Outcome of an optional enhancement.
///
/// Any failure collapses to the default value. The absorbed message is kept
/// for diagnostics but never turned back into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEffort<T> {
    value: T,
    absorbed: Option<String>,
}

impl<T: Default> BestEffort<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self {
                value,
                absorbed: None,
            },
            Err(e) => Self {
                value: T::default(),
                absorbed: Some(e.to_string()),
            },
        }
    }
}

impl<T> BestEffort<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Message of the failure that was swallowed, if any.
    pub fn absorbed(&self) -> Option<&str> {
        self.absorbed.as_deref()
    }
}
