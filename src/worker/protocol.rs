//! Protocol types for worker communication.
//!
//! Every request carries the connection parameters; the worker reflects,
//! suggests and executes against whatever `connection_string` names.

use serde::{Deserialize, Serialize};

use crate::model::{ReportSpec, SuggestionRecord, TableDescriptor};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope sent to the worker.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "schema.reflect").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope received from the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the request succeeded.
    pub success: bool,
    /// Result data (present if success = true).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error information (present if success = false).
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error information in a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Database connection parameters (included in all requests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Driver name the worker dispatches on (e.g., "sqlite").
    pub driver: String,
    /// Connection target, forwarded uninterpreted.
    pub connection_string: String,
}

/// Parameters for `schema.reflect`.
#[derive(Debug, Clone, Serialize)]
pub struct ReflectSchemaParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
}

/// Parameters for `shape.suggest`.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestShapesParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// Tables the suggestions are scoped to.
    pub include_tables: Vec<String>,
}

/// Parameters for `report.run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReportParams<'a> {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    pub spec: &'a ReportSpec,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response from `schema.reflect`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReflectSchemaResponse {
    pub tables: Vec<TableDescriptor>,
}

/// Response from `shape.suggest`.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestShapesResponse {
    #[serde(default)]
    pub shapes: Vec<SuggestionRecord>,
}

/// Response from `report.run`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunReportResponse {
    /// Column names, when the engine reports them separately from rows.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    /// Rows as objects, arrays, or (malformed) bare values.
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
    /// Trace steps as strings or structured objects.
    #[serde(default)]
    pub trace: Vec<serde_json::Value>,
}

// ============================================================================
// Method Names
// ============================================================================

/// Worker method names.
pub mod methods {
    pub const REFLECT_SCHEMA: &str = "schema.reflect";
    pub const SUGGEST_SHAPES: &str = "shape.suggest";
    pub const RUN_REPORT: &str = "report.run";
}
