//! One connection's schema snapshot and engine access.

use crate::backend::Backend;
use crate::model::{ColumnDescriptor, ReportSpec, ShapeIntent, SuggestionRecord, TableDescriptor};
use crate::result::{normalize, ExecutionTrace, ResultTable};

use super::error::{BestEffort, SessionError, SessionResult};

/// Normalized answer to one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub table: ResultTable,
    pub trace: ExecutionTrace,
}

/// Collaborator handles and schema snapshot for one connection target.
///
/// Operations that talk to the engine or replace the snapshot take
/// `&mut self`, so one session only ever has one call in flight.
#[derive(Debug)]
pub struct QuerySession {
    target: String,
    backend: Backend,
    tables: Vec<TableDescriptor>,
}

impl QuerySession {
    /// Establish a session by reflecting the target's schema.
    ///
    /// On failure no session exists and nothing is cached.
    pub async fn connect(target: impl Into<String>, backend: Backend) -> SessionResult<Self> {
        let target = target.into();
        let tables = backend
            .schema
            .reflect(&target)
            .await
            .map_err(|source| SessionError::Connection {
                target: target.clone(),
                source,
            })?;

        tracing::info!(%target, tables = tables.len(), "connected");

        Ok(Self {
            target,
            backend,
            tables,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Tables from the current snapshot.
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Reflect the schema again and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept.
    pub async fn list_tables(&mut self) -> SessionResult<&[TableDescriptor]> {
        let tables = self
            .backend
            .schema
            .reflect(&self.target)
            .await
            .map_err(SessionError::Schema)?;

        tracing::debug!(tables = tables.len(), "schema reflected");
        self.tables = tables;
        Ok(&self.tables)
    }

    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Columns of `table`, or an empty list if the table is unknown.
    pub fn columns_for(&self, table: &str) -> Vec<ColumnDescriptor> {
        self.table(table)
            .map(|t| t.columns.clone())
            .unwrap_or_default()
    }

    /// Ask for report shapes scoped to `table`. Failures yield no suggestions.
    pub async fn suggest_shapes_for(&mut self, table: &str) -> BestEffort<Vec<SuggestionRecord>> {
        let intent = ShapeIntent::for_table(table);
        let outcome = BestEffort::from_result(
            self.backend
                .suggester
                .suggest_shapes(&self.target, &intent)
                .await,
        );

        if let Some(message) = outcome.absorbed() {
            tracing::warn!(table, error = message, "shape suggestion failed; continuing without");
        }
        outcome
    }

    /// Run a report and normalize the engine's answer.
    ///
    /// Execution failures are returned as [`SessionError::Execution`] with the
    /// collaborator's error as the source.
    pub async fn run_report(&mut self, spec: &ReportSpec) -> SessionResult<ReportOutcome> {
        tracing::info!(
            report = %spec.name,
            metrics = spec.metrics.len(),
            group_by = spec.group_by.len(),
            filters = spec.filters.len(),
            limit = spec.limit,
            "running report"
        );

        let raw = self
            .backend
            .executor
            .run_report(&self.target, spec)
            .await
            .map_err(SessionError::Execution)?;

        let (table, trace) = normalize(raw);
        Ok(ReportOutcome { table, trace })
    }
}
