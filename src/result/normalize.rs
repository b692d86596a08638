//! Row normalization and trace rendering.

use std::fmt;

use serde_json::Value;

use super::row::{RawReport, ResultRow, TraceStep};

/// Prefix of every rendered trace.
pub const TRACE_PREFIX: &str = "Trace:\n";

/// Query output in one uniform shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    /// Field names of the first keyed row that had any.
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Column count, taken from the first row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Headers, but only when they line up with the table width.
    pub fn display_headers(&self) -> Option<&[String]> {
        self.headers
            .as_deref()
            .filter(|headers| headers.len() == self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Text rendering of the engine's trace steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionTrace {
    pub lines: Vec<String>,
}

impl ExecutionTrace {
    pub fn from_steps<'a>(steps: impl IntoIterator<Item = &'a TraceStep>) -> Self {
        Self {
            lines: steps.into_iter().map(ToString::to_string).collect(),
        }
    }

    /// `Trace:` followed by one line per step.
    pub fn render(&self) -> String {
        format!("{}{}", TRACE_PREFIX, self.lines.join("\n"))
    }
}

impl fmt::Display for ExecutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Normalize rows of mixed shape into a [`ResultTable`].
///
/// The first keyed row that exposes field names decides the headers; later
/// rows never change them. Every row contributes its values in its own
/// order, whatever its width.
pub fn normalize_rows(rows: impl IntoIterator<Item = ResultRow>) -> ResultTable {
    let mut headers: Option<Vec<String>> = None;
    let mut out = Vec::new();

    for row in rows {
        if let ResultRow::Keyed(keyed) = &row {
            if headers.is_none() {
                headers = keyed.field_names().map(<[String]>::to_vec);
            }
        }
        out.push(row.into_values());
    }

    ResultTable { headers, rows: out }
}

/// Normalize a whole engine answer into a table and its trace.
pub fn normalize(raw: RawReport) -> (ResultTable, ExecutionTrace) {
    let trace = ExecutionTrace::from_steps(&raw.trace);
    let table = normalize_rows(raw.rows);

    tracing::debug!(
        rows = table.rows.len(),
        width = table.width(),
        has_headers = table.headers.is_some(),
        trace_steps = trace.lines.len(),
        "normalized report result"
    );

    (table, trace)
}

/// Render one cell value as display text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
