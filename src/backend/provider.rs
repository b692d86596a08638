//! Collaborator traits.
//!
//! A session never reflects, suggests or executes anything itself. It talks
//! to three collaborators, each given the connection target as an opaque
//! string.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ReportSpec, ShapeIntent, SuggestionRecord, TableDescriptor};
use crate::result::RawReport;
use crate::worker::WorkerError;

/// Result type for collaborator calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by a collaborator.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The worker transport or the worker itself failed.
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// An in-process collaborator failed.
    #[error("{0}")]
    Failed(String),
}

impl BackendError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Reflects the tables and columns behind a connection target.
///
/// Must be side-effect free and safe to call repeatedly.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn reflect(&self, target: &str) -> BackendResult<Vec<TableDescriptor>>;
}

/// Proposes report shapes for a table-scoped intent.
#[async_trait]
pub trait ShapeSuggester: Send + Sync {
    async fn suggest_shapes(
        &self,
        target: &str,
        intent: &ShapeIntent,
    ) -> BackendResult<Vec<SuggestionRecord>>;
}

/// Runs a report and returns its rows and trace.
///
/// The report is borrowed immutably; executors cannot alter the request.
#[async_trait]
pub trait ReportExecutor: Send + Sync {
    async fn run_report(&self, target: &str, spec: &ReportSpec) -> BackendResult<RawReport>;
}

/// The three collaborators a session needs.
#[derive(Clone)]
pub struct Backend {
    pub schema: Arc<dyn SchemaProvider>,
    pub suggester: Arc<dyn ShapeSuggester>,
    pub executor: Arc<dyn ReportExecutor>,
}

impl Backend {
    pub fn new(
        schema: Arc<dyn SchemaProvider>,
        suggester: Arc<dyn ShapeSuggester>,
        executor: Arc<dyn ReportExecutor>,
    ) -> Self {
        Self {
            schema,
            suggester,
            executor,
        }
    }

    /// Use one value for all three roles.
    pub fn from_shared<T>(backend: Arc<T>) -> Self
    where
        T: SchemaProvider + ShapeSuggester + ReportExecutor + 'static,
    {
        Self {
            schema: backend.clone(),
            suggester: backend.clone(),
            executor: backend,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}
