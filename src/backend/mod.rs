//! Backend collaborators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Backend                              │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  SchemaProvider   │  ShapeSuggester   │  ReportExecutor   │  │
//! │  │  - reflect()      │  - suggest_shapes │  - run_report()   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 WorkerBackend → WorkerClient                    │
//! │              (NDJSON over stdin/stdout)                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Anything that implements the three traits can stand in for the worker,
//! e.g. an in-process engine or a test double.

mod provider;
mod worker_provider;

pub use provider::{
    Backend, BackendError, BackendResult, ReportExecutor, SchemaProvider, ShapeSuggester,
};
pub use worker_provider::WorkerBackend;
