//! Raw result rows and trace steps as they arrive from the engine.

use std::fmt;

use serde_json::Value;

/// A row whose fields are named.
///
/// Names are optional: an engine may report a record whose field names
/// cannot be enumerated. Such a row still contributes its values.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRow {
    names: Option<Vec<String>>,
    values: Vec<Value>,
}

impl KeyedRow {
    /// Build from `(name, value)` pairs in declaration order.
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        let (names, values): (Vec<String>, Vec<Value>) =
            fields.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self {
            names: Some(names),
            values,
        }
    }

    /// A keyed row whose field names are not available.
    pub fn unnamed(values: Vec<Value>) -> Self {
        Self {
            names: None,
            values,
        }
    }

    pub fn field_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// One result row, either keyed or positional.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultRow {
    Keyed(KeyedRow),
    Positional(Vec<Value>),
}

impl ResultRow {
    /// Decode a JSON row.
    ///
    /// Objects become keyed rows in field order. Arrays become positional
    /// rows, or keyed rows when `columns` names them. Any other value is
    /// kept as a one-value positional row.
    pub fn from_json(value: Value, columns: Option<&[String]>) -> Self {
        match value {
            Value::Object(map) => ResultRow::Keyed(KeyedRow::new(map)),
            Value::Array(values) => match columns {
                Some(names) => ResultRow::Keyed(KeyedRow {
                    names: Some(names.to_vec()),
                    values,
                }),
                None => ResultRow::Positional(values),
            },
            scalar => ResultRow::Positional(vec![scalar]),
        }
    }

    pub fn values(&self) -> &[Value] {
        match self {
            ResultRow::Keyed(row) => row.values(),
            ResultRow::Positional(values) => values,
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        match self {
            ResultRow::Keyed(row) => row.into_values(),
            ResultRow::Positional(values) => values,
        }
    }
}

/// One step of the engine's explanation of how a report was computed.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceStep {
    Text(String),
    Structured(Value),
}

impl From<Value> for TraceStep {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => TraceStep::Text(text),
            other => TraceStep::Structured(other),
        }
    }
}

impl From<&str> for TraceStep {
    fn from(text: &str) -> Self {
        TraceStep::Text(text.to_string())
    }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceStep::Text(text) => f.write_str(text),
            // Compact JSON is always a single line.
            TraceStep::Structured(value) => write!(f, "{}", value),
        }
    }
}

/// Rows and trace exactly as the engine returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReport {
    pub rows: Vec<ResultRow>,
    pub trace: Vec<TraceStep>,
}
