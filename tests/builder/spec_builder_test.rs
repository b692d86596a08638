use querydeck::builder::SpecBuilder;
use querydeck::model::{ColumnDescriptor, FilterOp, FilterSpec, MetricSpec, SuggestionRecord};

fn orders_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "INTEGER"),
        ColumnDescriptor::new("amount", "NUMERIC"),
        ColumnDescriptor::new("region", "VARCHAR"),
    ]
}

fn orders_builder() -> SpecBuilder {
    let mut builder = SpecBuilder::new();
    builder.set_base_entity("orders", orders_columns());
    builder
}

// =============================================================================
// Metrics
// =============================================================================

#[test]
fn test_no_metric_rows_yields_count_star() {
    let builder = SpecBuilder::new();
    assert!(builder.metrics().is_empty());

    let spec = builder.build();
    assert_eq!(spec.metrics, vec![MetricSpec::new("COUNT(*)", "count")]);
}

#[test]
fn test_blank_expression_rows_fall_back_to_count_star() {
    let mut builder = orders_builder();
    builder.set_metric(0, "   ", "ignored");
    builder.add_metric();

    assert_eq!(builder.build().metrics, vec![MetricSpec::count_star()]);
}

#[test]
fn test_blank_alias_uses_row_position() {
    let mut builder = SpecBuilder::new();
    let first = builder.add_metric();
    let second = builder.add_metric();
    let third = builder.add_metric();
    let fourth = builder.add_metric();
    builder.set_metric(first, "SUM(amount)", "");
    builder.set_metric(second, "", "skipped");
    builder.set_metric(third, "MAX(amount)", "metric_0");
    builder.set_metric(fourth, " AVG(amount) ", "  ");

    let spec = builder.build();
    assert_eq!(
        spec.metrics,
        vec![
            MetricSpec::new("SUM(amount)", "metric_0"),
            MetricSpec::new("MAX(amount)", "metric_0"),
            MetricSpec::new("AVG(amount)", "metric_3"),
        ]
    );
}

#[test]
fn test_set_base_entity_adds_default_metric_row() {
    let builder = orders_builder();
    assert_eq!(builder.metrics().len(), 1);
    assert_eq!(builder.metrics()[0].expr, "COUNT(*)");
    assert_eq!(builder.metrics()[0].alias, "count");
}

#[test]
fn test_first_metric_row_is_prefilled() {
    let mut builder = SpecBuilder::new();
    builder.add_metric();
    let row = builder.add_metric();
    builder.set_metric(row, "SUM(x)", "s");

    assert_eq!(builder.metrics()[row - 1].expr, "COUNT(*)");
    assert_eq!(
        builder.build().metrics,
        vec![MetricSpec::new("COUNT(*)", "count"), MetricSpec::new("SUM(x)", "s")]
    );
}

#[test]
fn test_metric_prefill_returns_after_clearing() {
    let mut builder = orders_builder();
    builder.remove_metric(0);

    let row = builder.add_metric();
    assert_eq!(builder.metrics()[row].expr, "COUNT(*)");
    let next = builder.add_metric();
    assert!(builder.metrics()[next].expr.is_empty());
}

#[test]
fn test_remove_metric() {
    let mut builder = orders_builder();
    let row = builder.add_metric();
    builder.set_metric(row, "SUM(amount)", "total");

    let removed = builder.remove_metric(0).unwrap();
    assert_eq!(removed.expr, "COUNT(*)");
    assert!(builder.remove_metric(5).is_none());
    assert_eq!(builder.build().metrics, vec![MetricSpec::new("SUM(amount)", "total")]);
}

// =============================================================================
// Group by
// =============================================================================

#[test]
fn test_group_by_rows_follow_columns() {
    let mut builder = orders_builder();
    let columns: Vec<&str> = builder.group_by().iter().map(|r| r.column.as_str()).collect();
    assert_eq!(columns, vec!["id", "amount", "region"]);

    assert_eq!(builder.toggle_group_by(2), Some(true));
    assert_eq!(builder.toggle_group_by(9), None);
    assert!(builder.set_group_by("id", true));
    assert!(!builder.set_group_by("missing", true));

    // Collected in column order, not toggle order.
    assert_eq!(builder.build().group_by, vec!["orders.id", "orders.region"]);
}

#[test]
fn test_new_base_entity_resets_group_by_and_filters() {
    let mut builder = orders_builder();
    builder.set_group_by("region", true);
    let row = builder.add_filter();
    builder.set_filter_value(row, "1");

    builder.set_base_entity("customers", vec![ColumnDescriptor::new("name", "TEXT")]);

    assert!(builder.filters().is_empty());
    assert_eq!(builder.group_by().len(), 1);
    assert!(builder.build().group_by.is_empty());
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_incomplete_filters_are_dropped() {
    let mut builder = orders_builder();

    let no_value = builder.add_filter();
    builder.set_filter_value(no_value, "   ");

    let no_op = builder.add_filter();
    builder.set_filter_op(no_op, None);
    builder.set_filter_value(no_op, "5");

    let no_column = builder.add_filter();
    builder.filter_mut(no_column).unwrap().column = " ".to_string();
    builder.set_filter_value(no_column, "5");

    let complete = builder.add_filter();
    builder.select_filter_column(complete, "region");
    builder.set_filter_op(complete, Some(FilterOp::Like));
    builder.set_filter_value(complete, " 'we%' ");

    assert_eq!(
        builder.build().filters,
        vec![FilterSpec::new("orders.region", FilterOp::Like, "'we%'")]
    );
}

#[test]
fn test_filter_defaults_to_first_column_and_eq() {
    let mut builder = orders_builder();
    let row = builder.add_filter();

    let filter = &builder.filters()[row];
    assert_eq!(filter.column, "id");
    assert_eq!(filter.op, Some(FilterOp::Eq));
    assert!(filter.value.is_empty());
}

#[test]
fn test_filter_choices_are_a_snapshot() {
    let mut builder = SpecBuilder::new();
    let empty = builder.add_filter();
    assert!(builder.filters()[empty].choices().is_empty());
    assert_eq!(builder.filters()[empty].column, "");

    builder.set_base_entity("orders", vec![ColumnDescriptor::new("id", "INTEGER")]);
    let narrow = builder.add_filter();
    assert_eq!(builder.filters()[narrow].choices(), &["id".to_string()]);

    // Replacing the base table drops rows instead of re-seeding them.
    builder.set_base_entity("orders", orders_columns());
    assert!(builder.filters().is_empty());

    let wide = builder.add_filter();
    assert_eq!(builder.filters()[wide].choices().len(), 3);
}

#[test]
fn test_existing_filter_rows_keep_their_choices() {
    let mut builder = orders_builder();
    let row = builder.add_filter();
    let choices_before = builder.filters()[row].choices().to_vec();

    // Metric and group-by edits never touch filter snapshots.
    builder.add_metric();
    builder.set_group_by("amount", true);

    assert_eq!(builder.filters()[row].choices(), choices_before.as_slice());
    assert!(!builder.select_filter_column(row, "customer_id"));
    assert!(builder.select_filter_column(row, "amount"));
}

#[test]
fn test_unqualified_without_base_table() {
    let mut builder = SpecBuilder::new();
    let row = builder.add_filter();
    builder.filter_mut(row).unwrap().column = "amount".to_string();
    builder.set_filter_value(row, "10");

    let spec = builder.build();
    assert_eq!(spec.filters, vec![FilterSpec::new("amount", FilterOp::Eq, "10")]);
    assert_eq!(spec.name, "gui_query");
    assert!(spec.base_sql.is_none());
}

#[test]
fn test_remove_filter() {
    let mut builder = orders_builder();
    builder.add_filter();
    let second = builder.add_filter();
    builder.select_filter_column(second, "region");

    assert!(builder.remove_filter(7).is_none());
    builder.remove_filter(0);
    assert_eq!(builder.filters().len(), 1);
    assert_eq!(builder.filters()[0].column, "region");
}

// =============================================================================
// Build
// =============================================================================

#[test]
fn test_orders_scenario() {
    let mut builder = orders_builder();
    builder.set_group_by("region", true);
    let row = builder.add_filter();
    builder.select_filter_column(row, "amount");
    builder.set_filter_op(row, Some(FilterOp::Gt));
    builder.set_filter_value(row, "100");

    let spec = builder.build();

    assert_eq!(spec.metrics, vec![MetricSpec::new("COUNT(*)", "count")]);
    assert_eq!(spec.group_by, vec!["orders.region"]);
    assert_eq!(
        spec.filters,
        vec![FilterSpec::new("orders.amount", FilterOp::Gt, "100")]
    );
    assert_eq!(spec.limit, 1000);
    assert_eq!(spec.base_sql.as_deref(), Some("SELECT * FROM orders"));
    assert!(spec.raw_sql.is_none());
    assert_eq!(spec.name, "gui_orders");
}

#[test]
fn test_build_is_idempotent() {
    let mut builder = orders_builder();
    builder.set_group_by("amount", true);
    let row = builder.add_metric();
    builder.set_metric(row, "SUM(amount)", "");
    builder.set_limit(42);

    assert_eq!(builder.build(), builder.build());
}

#[test]
fn test_limit_bounds() {
    let mut builder = SpecBuilder::new();
    assert_eq!(builder.build().limit, 1000);

    builder.set_limit(0);
    assert_eq!(builder.build().limit, 1);

    builder.set_limit(u32::MAX);
    assert_eq!(builder.build().limit, 1_000_000);

    assert_eq!(SpecBuilder::with_default_limit(250).build().limit, 250);
}

// =============================================================================
// Suggestions
// =============================================================================

#[test]
fn test_selecting_a_suggestion_changes_nothing() {
    let mut builder = orders_builder();
    builder.set_suggestions(vec![
        SuggestionRecord::described("Revenue by region"),
        SuggestionRecord::default(),
    ]);
    let before = builder.build();

    let chosen = builder.select_suggestion(1).cloned();
    assert_eq!(
        chosen.and_then(|r| r.description),
        Some("Revenue by region".to_string())
    );
    assert_eq!(builder.selected_suggestion(), 1);
    assert_eq!(builder.build(), before);

    assert!(builder.select_suggestion(0).is_none());
    assert_eq!(builder.selected_suggestion(), 0);
}

#[test]
fn test_new_base_entity_drops_suggestions() {
    let mut builder = orders_builder();
    builder.set_suggestions(vec![SuggestionRecord::described("Revenue by region")]);
    builder.select_suggestion(1);

    builder.set_base_entity("customers", Vec::new());

    assert!(builder.suggestions().is_empty());
    assert_eq!(builder.selected_suggestion(), 0);
}
