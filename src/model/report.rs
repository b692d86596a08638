// src/model/report.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest accepted row limit.
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted row limit.
pub const MAX_LIMIT: u32 = 1_000_000;
/// Row limit used when nothing else is configured.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Clamp a requested row limit into `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// A fully assembled report request, as handed to the query engine.
///
/// Built fresh from the current selections on every submission and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSpec {
    pub name: String,
    /// Never empty when produced by the builder.
    pub metrics: Vec<MetricSpec>,
    /// Qualified column names, in selection order.
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    pub limit: u32,
    /// Base scan the engine starts from, e.g. `SELECT * FROM orders`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_sql: Option<String>,
    /// Raw statement that overrides planning altogether.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_sql: Option<String>,
}

impl ReportSpec {
    /// Attach a raw override statement.
    pub fn with_raw_sql(mut self, sql: impl Into<String>) -> Self {
        self.raw_sql = Some(sql.into());
        self
    }
}

/// A requested aggregate or expression with its output alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Engine-specific expression, opaque here.
    pub expr: String,
    pub alias: String,
}

impl MetricSpec {
    pub fn new(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: alias.into(),
        }
    }

    /// `COUNT(*)` aliased `count`, substituted when no metric is selected.
    pub fn count_star() -> Self {
        Self::new("COUNT(*)", "count")
    }
}

/// A single `column op value` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub column: String,
    pub op: FilterOp,
    /// Literal value, passed through untyped.
    pub value: String,
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// Comparison operators a filter row can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "BETWEEN")]
    Between,
}

impl FilterOp {
    /// All operators, in the order a picker lists them.
    pub const ALL: [FilterOp; 9] = [
        FilterOp::Eq,
        FilterOp::NotEq,
        FilterOp::Lt,
        FilterOp::LtEq,
        FilterOp::Gt,
        FilterOp::GtEq,
        FilterOp::Like,
        FilterOp::In,
        FilterOp::Between,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::NotEq => "!=",
            FilterOp::Lt => "<",
            FilterOp::LtEq => "<=",
            FilterOp::Gt => ">",
            FilterOp::GtEq => ">=",
            FilterOp::Like => "LIKE",
            FilterOp::In => "IN",
            FilterOp::Between => "BETWEEN",
        }
    }

    /// Parse an operator symbol. Keywords are matched case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
