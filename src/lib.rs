//! # querydeck
//!
//! Interactive report building against a reflected relational schema.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          ColumnCatalog (columns of the base table)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │     SpecBuilder → ReportSpec (metrics, group by,         │
//! │                   filters, limit, base scan)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [session]
//! ┌─────────────────────────────────────────────────────────┐
//! │   QuerySession → Backend (reflect / suggest / execute)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [result]
//! ┌─────────────────────────────────────────────────────────┐
//! │          ResultTable + ExecutionTrace                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate never plans or executes SQL itself. Reflection, shape
//! suggestion and execution are collaborators behind the traits in
//! [`backend`]; [`backend::WorkerBackend`] forwards them to an
//! out-of-process worker.

pub mod backend;
pub mod builder;
pub mod config;
pub mod model;
pub mod result;
pub mod session;
pub mod worker;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::backend::{
        Backend, BackendError, ReportExecutor, SchemaProvider, ShapeSuggester, WorkerBackend,
    };
    pub use crate::builder::SpecBuilder;
    pub use crate::model::{
        ColumnDescriptor, FilterOp, FilterSpec, MetricSpec, ReportSpec, ShapeIntent,
        SuggestionAdapter, SuggestionRecord, TableDescriptor,
    };
    pub use crate::result::{ExecutionTrace, KeyedRow, RawReport, ResultRow, ResultTable, TraceStep};
    pub use crate::session::{BestEffort, QuerySession, ReportOutcome, SessionError, Workspace};
}

pub use builder::SpecBuilder;
pub use model::ReportSpec;
pub use session::{QuerySession, Workspace};
