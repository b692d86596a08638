//! Schema descriptors, report requests and shape suggestions.

pub mod catalog;
pub mod report;
pub mod suggestion;

pub use catalog::{ColumnCatalog, ColumnDescriptor, TableDescriptor};
pub use report::{
    clamp_limit, FilterOp, FilterSpec, MetricSpec, ReportSpec, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT,
};
pub use suggestion::{
    ShapeIntent, SuggestionAdapter, SuggestionDescriptor, SuggestionRecord, NO_SUGGESTION_LABEL,
    UNNAMED_SHAPE_LABEL,
};
