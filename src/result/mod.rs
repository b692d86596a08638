//! Result normalization.
//!
//! Engines answer with rows of two shapes that may be mixed freely:
//!
//! ```text
//! keyed       {"region": "west", "count": 3}    names + values
//! positional  ["west", 3]                       values only
//! ```
//!
//! [`normalize`] folds them into one [`ResultTable`] (optional headers plus
//! rows of values) and renders the engine's trace steps into an
//! [`ExecutionTrace`]. Headers come from the first keyed row that can name
//! its fields; values are never reordered to match them, and rows of a
//! different width are kept as they are.

mod normalize;
mod row;

pub use normalize::{
    normalize, normalize_rows, render_value, ExecutionTrace, ResultTable, TRACE_PREFIX,
};
pub use row::{KeyedRow, RawReport, ResultRow, TraceStep};
