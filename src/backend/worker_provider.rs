//! WorkerBackend implementation.
//!
//! Implements all three collaborator traits by forwarding requests to the
//! worker process over the [`WorkerClient`].

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{BackendResult, ReportExecutor, SchemaProvider, ShapeSuggester};
use crate::model::{ReportSpec, ShapeIntent, SuggestionRecord, TableDescriptor};
use crate::result::{RawReport, ResultRow, TraceStep};
use crate::worker::protocol::{self, methods, ConnectionParams, RunReportResponse};
use crate::worker::WorkerClient;

/// Collaborators backed by the worker process.
///
/// # Example
///
/// ```ignore
/// use querydeck::backend::{Backend, WorkerBackend};
/// use querydeck::worker::WorkerClient;
///
/// let client = WorkerClient::spawn("./querydeck-worker").await?;
/// let backend = Backend::from_shared(Arc::new(WorkerBackend::with_client(client, "sqlite")));
/// ```
pub struct WorkerBackend {
    client: Arc<WorkerClient>,
    driver: String,
}

impl WorkerBackend {
    pub fn new(client: Arc<WorkerClient>, driver: impl Into<String>) -> Self {
        Self {
            client,
            driver: driver.into(),
        }
    }

    /// Convenience constructor that wraps the client in an `Arc`.
    pub fn with_client(client: WorkerClient, driver: impl Into<String>) -> Self {
        Self::new(Arc::new(client), driver)
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    #[inline]
    fn connection_params(&self, target: &str) -> ConnectionParams {
        ConnectionParams {
            driver: self.driver.clone(),
            connection_string: target.to_string(),
        }
    }
}

#[async_trait]
impl SchemaProvider for WorkerBackend {
    async fn reflect(&self, target: &str) -> BackendResult<Vec<TableDescriptor>> {
        let response: protocol::ReflectSchemaResponse = self
            .client
            .request(
                methods::REFLECT_SCHEMA,
                protocol::ReflectSchemaParams {
                    connection: self.connection_params(target),
                },
            )
            .await?;

        Ok(response.tables)
    }
}

#[async_trait]
impl ShapeSuggester for WorkerBackend {
    async fn suggest_shapes(
        &self,
        target: &str,
        intent: &ShapeIntent,
    ) -> BackendResult<Vec<SuggestionRecord>> {
        let response: protocol::SuggestShapesResponse = self
            .client
            .request(
                methods::SUGGEST_SHAPES,
                protocol::SuggestShapesParams {
                    connection: self.connection_params(target),
                    include_tables: intent.include_tables.clone(),
                },
            )
            .await?;

        Ok(response.shapes)
    }
}

#[async_trait]
impl ReportExecutor for WorkerBackend {
    async fn run_report(&self, target: &str, spec: &ReportSpec) -> BackendResult<RawReport> {
        let response: RunReportResponse = self
            .client
            .request(
                methods::RUN_REPORT,
                protocol::RunReportParams {
                    connection: self.connection_params(target),
                    spec,
                },
            )
            .await?;

        Ok(raw_report_from_response(response))
    }
}

/// Decode a `report.run` answer into rows and trace steps.
pub(crate) fn raw_report_from_response(response: RunReportResponse) -> RawReport {
    let columns = response.columns.as_deref();
    RawReport {
        rows: response
            .rows
            .into_iter()
            .map(|row| ResultRow::from_json(row, columns))
            .collect(),
        trace: response.trace.into_iter().map(TraceStep::from).collect(),
    }
}
