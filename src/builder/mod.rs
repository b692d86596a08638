//! Interactive report assembly.
//!
//! [`SpecBuilder`] holds the editable selections a user works with (base
//! table, metric rows, group-by toggles, filter rows, limit) and turns them
//! into a [`ReportSpec`] on demand.
//!
//! # Leniency
//!
//! [`SpecBuilder::build`] never fails. Incomplete input is handled by
//! substitution or omission:
//!
//! - metric rows with a blank expression are skipped, blank aliases become
//!   `metric_<row>`, and an empty metric list becomes `COUNT(*) AS count`
//! - filter rows missing a column, operator or value are skipped
//! - the limit is clamped into `[1, 1_000_000]` when it is set
//!
//! # Filter column snapshots
//!
//! A filter row records the catalog's column names at the moment it is
//! added. Replacing the catalog later does not update existing rows; the
//! snapshot is part of the row's contract.
//!
//! # Example
//!
//! ```
//! use querydeck::builder::SpecBuilder;
//! use querydeck::model::{ColumnDescriptor, FilterOp};
//!
//! let mut builder = SpecBuilder::new();
//! builder.set_base_entity(
//!     "orders",
//!     vec![
//!         ColumnDescriptor::new("amount", "NUMERIC"),
//!         ColumnDescriptor::new("region", "TEXT"),
//!     ],
//! );
//! builder.set_group_by("region", true);
//! let row = builder.add_filter();
//! builder.select_filter_column(row, "amount");
//! builder.set_filter_op(row, Some(FilterOp::Gt));
//! builder.set_filter_value(row, "100");
//!
//! let spec = builder.build();
//! assert_eq!(spec.group_by, vec!["orders.region"]);
//! assert_eq!(spec.filters[0].column, "orders.amount");
//! ```

use crate::model::{
    clamp_limit, ColumnCatalog, ColumnDescriptor, FilterOp, FilterSpec, MetricSpec, ReportSpec,
    SuggestionAdapter, SuggestionRecord, DEFAULT_LIMIT,
};

/// Prefix of every built report's name.
pub const REPORT_NAME_PREFIX: &str = "gui_";

/// Name stem used when there is no base table.
pub const UNTABLED_REPORT_STEM: &str = "query";

/// One editable metric row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricRow {
    pub expr: String,
    pub alias: String,
}

impl MetricRow {
    pub fn new(expr: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: alias.into(),
        }
    }
}

/// Group-by toggle for one catalog column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupByRow {
    pub column: String,
    pub enabled: bool,
}

/// One editable filter row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    choices: Vec<String>,
    pub column: String,
    pub op: Option<FilterOp>,
    pub value: String,
}

impl FilterRow {
    fn seeded(choices: Vec<String>) -> Self {
        let column = choices.first().cloned().unwrap_or_default();
        Self {
            choices,
            column,
            op: Some(FilterOp::Eq),
            value: String::new(),
        }
    }

    /// Column names available when this row was added.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Pick a column from this row's snapshot. Unknown names are rejected.
    pub fn select_column(&mut self, column: &str) -> bool {
        if self.choices.iter().any(|c| c == column) {
            self.column = column.to_string();
            true
        } else {
            false
        }
    }

    fn to_spec(&self, qualify: impl Fn(&str) -> String) -> Option<FilterSpec> {
        let column = self.column.trim();
        let value = self.value.trim();
        match self.op {
            Some(op) if !column.is_empty() && !value.is_empty() => {
                Some(FilterSpec::new(qualify(column), op, value))
            }
            _ => None,
        }
    }
}

/// Mutable selections that [`SpecBuilder::build`] turns into a report.
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    base_table: Option<String>,
    catalog: ColumnCatalog,
    metrics: Vec<MetricRow>,
    group_by: Vec<GroupByRow>,
    filters: Vec<FilterRow>,
    limit: u32,
    suggestions: SuggestionAdapter,
    selected_suggestion: usize,
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecBuilder {
    pub fn new() -> Self {
        Self::with_default_limit(DEFAULT_LIMIT)
    }

    /// Start with a configured limit instead of [`DEFAULT_LIMIT`].
    pub fn with_default_limit(limit: u32) -> Self {
        Self {
            base_table: None,
            catalog: ColumnCatalog::default(),
            metrics: Vec::new(),
            group_by: Vec::new(),
            filters: Vec::new(),
            limit: clamp_limit(limit),
            suggestions: SuggestionAdapter::default(),
            selected_suggestion: 0,
        }
    }

    // =========================================================================
    // Base table
    // =========================================================================

    /// Select the base table and its columns.
    ///
    /// Group-by toggles are rebuilt (all off), filters are cleared, a default
    /// `COUNT(*)` metric row is added if there is none, and any suggestions
    /// for the previous table are dropped. Existing metric rows survive.
    pub fn set_base_entity(&mut self, table: impl Into<String>, columns: Vec<ColumnDescriptor>) {
        self.base_table = Some(table.into());
        self.group_by = columns
            .iter()
            .map(|c| GroupByRow {
                column: c.name.clone(),
                enabled: false,
            })
            .collect();
        self.catalog = ColumnCatalog::new(columns);
        self.filters.clear();
        self.clear_suggestions();

        if self.metrics.is_empty() {
            self.add_metric();
        }
    }

    pub fn base_table(&self) -> Option<&str> {
        self.base_table.as_deref()
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    /// Append a metric row and return its index.
    ///
    /// The first row starts as `COUNT(*)`/`count`; later rows start blank.
    pub fn add_metric(&mut self) -> usize {
        let row = if self.metrics.is_empty() {
            let count = MetricSpec::count_star();
            MetricRow::new(count.expr, count.alias)
        } else {
            MetricRow::default()
        };
        self.metrics.push(row);
        self.metrics.len() - 1
    }

    /// Remove a metric row. Out-of-range indexes are ignored.
    pub fn remove_metric(&mut self, index: usize) -> Option<MetricRow> {
        (index < self.metrics.len()).then(|| self.metrics.remove(index))
    }

    /// Overwrite a metric row. Returns `false` if the row does not exist.
    pub fn set_metric(
        &mut self,
        index: usize,
        expr: impl Into<String>,
        alias: impl Into<String>,
    ) -> bool {
        match self.metrics.get_mut(index) {
            Some(row) => {
                *row = MetricRow::new(expr, alias);
                true
            }
            None => false,
        }
    }

    pub fn metrics(&self) -> &[MetricRow] {
        &self.metrics
    }

    // =========================================================================
    // Group by
    // =========================================================================

    /// Enable or disable grouping on a catalog column.
    pub fn set_group_by(&mut self, column: &str, enabled: bool) -> bool {
        match self.group_by.iter_mut().find(|row| row.column == column) {
            Some(row) => {
                row.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Flip the toggle at `index`, returning the new state.
    pub fn toggle_group_by(&mut self, index: usize) -> Option<bool> {
        self.group_by.get_mut(index).map(|row| {
            row.enabled = !row.enabled;
            row.enabled
        })
    }

    pub fn group_by(&self) -> &[GroupByRow] {
        &self.group_by
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Append a filter row seeded with the current catalog's column names.
    pub fn add_filter(&mut self) -> usize {
        self.filters.push(FilterRow::seeded(self.catalog.names()));
        self.filters.len() - 1
    }

    /// Remove a filter row. Out-of-range indexes are ignored.
    pub fn remove_filter(&mut self, index: usize) -> Option<FilterRow> {
        (index < self.filters.len()).then(|| self.filters.remove(index))
    }

    pub fn filter_mut(&mut self, index: usize) -> Option<&mut FilterRow> {
        self.filters.get_mut(index)
    }

    pub fn select_filter_column(&mut self, index: usize, column: &str) -> bool {
        self.filters
            .get_mut(index)
            .is_some_and(|row| row.select_column(column))
    }

    pub fn set_filter_op(&mut self, index: usize, op: Option<FilterOp>) -> bool {
        self.filters
            .get_mut(index)
            .map(|row| row.op = op)
            .is_some()
    }

    pub fn set_filter_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.filters
            .get_mut(index)
            .map(|row| row.value = value.into())
            .is_some()
    }

    pub fn filters(&self) -> &[FilterRow] {
        &self.filters
    }

    // =========================================================================
    // Limit
    // =========================================================================

    /// Set the row limit, clamped into the accepted range.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = clamp_limit(limit);
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Replace the suggestion list for the current table.
    pub fn set_suggestions(&mut self, records: Vec<SuggestionRecord>) {
        self.suggestions = SuggestionAdapter::from_raw(records);
        self.selected_suggestion = 0;
    }

    pub fn suggestions(&self) -> &SuggestionAdapter {
        &self.suggestions
    }

    /// Record a picker choice and return the record it names.
    ///
    /// Selections are left untouched: choosing a shape does not pre-fill
    /// metrics, grouping or filters.
    pub fn select_suggestion(&mut self, choice: usize) -> Option<&SuggestionRecord> {
        let record = self.suggestions.resolve(choice);
        self.selected_suggestion = if record.is_some() { choice } else { 0 };
        record
    }

    pub fn selected_suggestion(&self) -> usize {
        self.selected_suggestion
    }

    fn clear_suggestions(&mut self) {
        self.suggestions = SuggestionAdapter::default();
        self.selected_suggestion = 0;
    }

    // =========================================================================
    // Build
    // =========================================================================

    fn qualify(&self, column: &str) -> String {
        match &self.base_table {
            Some(table) if !table.is_empty() => format!("{}.{}", table, column),
            _ => column.to_string(),
        }
    }

    /// Assemble a report from the current selections.
    pub fn build(&self) -> ReportSpec {
        let table = self.base_table.as_deref().filter(|t| !t.is_empty());

        let mut metrics: Vec<MetricSpec> = self
            .metrics
            .iter()
            .enumerate()
            .filter_map(|(row, metric)| {
                let expr = metric.expr.trim();
                if expr.is_empty() {
                    return None;
                }
                let alias = match metric.alias.trim() {
                    "" => format!("metric_{}", row),
                    alias => alias.to_string(),
                };
                Some(MetricSpec::new(expr, alias))
            })
            .collect();
        if metrics.is_empty() {
            metrics.push(MetricSpec::count_star());
        }

        let group_by = self
            .group_by
            .iter()
            .filter(|row| row.enabled)
            .map(|row| row.column.trim())
            .filter(|column| !column.is_empty())
            .map(|column| self.qualify(column))
            .collect();

        let filters = self
            .filters
            .iter()
            .filter_map(|row| row.to_spec(|column| self.qualify(column)))
            .collect();

        ReportSpec {
            name: format!("{}{}", REPORT_NAME_PREFIX, table.unwrap_or(UNTABLED_REPORT_STEM)),
            metrics,
            group_by,
            filters,
            limit: self.limit,
            base_sql: table.map(|t| format!("SELECT * FROM {}", t)),
            raw_sql: None,
        }
    }
}
