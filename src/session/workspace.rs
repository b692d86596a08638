//! Application state: the live session plus the report being built.

use crate::backend::Backend;
use crate::builder::SpecBuilder;
use crate::model::{ReportSpec, DEFAULT_LIMIT};

use super::error::{SessionError, SessionResult};
use super::query_session::{QuerySession, ReportOutcome};

/// At most one session and the builder that feeds it.
///
/// Connecting replaces everything wholesale: the old session, its schema
/// snapshot, the suggestion list and any half-built report are discarded.
#[derive(Debug)]
pub struct Workspace {
    session: Option<QuerySession>,
    builder: SpecBuilder,
    default_limit: u32,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_default_limit(DEFAULT_LIMIT)
    }

    /// Builders created by this workspace start at `limit`.
    pub fn with_default_limit(limit: u32) -> Self {
        Self {
            session: None,
            builder: SpecBuilder::with_default_limit(limit),
            default_limit: limit,
        }
    }

    /// Connect to `target`, replacing any existing session.
    ///
    /// If connecting fails the current state is left untouched.
    pub async fn connect(&mut self, target: impl Into<String>, backend: Backend) -> SessionResult<()> {
        let session = QuerySession::connect(target, backend).await?;
        self.session = Some(session);
        self.builder = SpecBuilder::with_default_limit(self.default_limit);
        Ok(())
    }

    pub fn session(&self) -> Option<&QuerySession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> SessionResult<&mut QuerySession> {
        self.session.as_mut().ok_or(SessionError::NotConnected)
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn builder(&self) -> &SpecBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut SpecBuilder {
        &mut self.builder
    }

    /// Make `table` the base table and load its shape suggestions.
    ///
    /// An unknown table is selected with no columns.
    pub async fn select_table(&mut self, table: &str) -> SessionResult<()> {
        let session = self.session.as_mut().ok_or(SessionError::NotConnected)?;

        let columns = session.columns_for(table);
        self.builder.set_base_entity(table, columns);

        let shapes = session.suggest_shapes_for(table).await.into_inner();
        self.builder.set_suggestions(shapes);
        Ok(())
    }

    /// Build the current report and run it.
    pub async fn run(&mut self) -> SessionResult<(ReportSpec, ReportOutcome)> {
        let spec = self.builder.build();
        let outcome = self.session_mut()?.run_report(&spec).await?;
        Ok((spec, outcome))
    }
}
