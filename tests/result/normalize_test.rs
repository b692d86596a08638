use querydeck::result::{
    normalize, normalize_rows, ExecutionTrace, KeyedRow, RawReport, ResultRow, TraceStep,
    TRACE_PREFIX,
};
use serde_json::json;

fn keyed(fields: serde_json::Value) -> ResultRow {
    ResultRow::from_json(fields, None)
}

#[test]
fn test_positional_rows_have_no_headers() {
    let table = normalize_rows(vec![
        ResultRow::Positional(vec![json!("west"), json!(12)]),
        ResultRow::Positional(vec![json!("east"), json!(7)]),
    ]);

    assert!(table.headers.is_none());
    assert_eq!(table.width(), 2);
    assert_eq!(
        table.rows,
        vec![
            vec![json!("west"), json!(12)],
            vec![json!("east"), json!(7)],
        ]
    );
}

#[test]
fn test_first_keyed_row_decides_headers() {
    let table = normalize_rows(vec![
        keyed(json!({"a": 1, "b": 2})),
        keyed(json!({"b": 3, "a": 4})),
    ]);

    assert_eq!(table.headers, Some(vec!["a".to_string(), "b".to_string()]));
    // The second row keeps its own field order.
    assert_eq!(table.rows, vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]]);
}

#[test]
fn test_headers_from_keyed_row_after_positional() {
    let table = normalize_rows(vec![
        ResultRow::Positional(vec![json!("north")]),
        keyed(json!({"region": "south"})),
    ]);

    assert_eq!(table.headers, Some(vec!["region".to_string()]));
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn test_mixed_widths_are_kept() {
    let table = normalize_rows(vec![
        keyed(json!({"region": "west", "count": 12})),
        ResultRow::Positional(vec![json!("east")]),
        ResultRow::Positional(vec![json!("north"), json!(1), json!(true)]),
    ]);

    assert_eq!(table.width(), 2);
    let widths: Vec<usize> = table.rows.iter().map(Vec::len).collect();
    assert_eq!(widths, vec![2, 1, 3]);
    assert_eq!(
        table.display_headers(),
        Some(&["region".to_string(), "count".to_string()][..])
    );
}

#[test]
fn test_unnamed_keyed_rows_only() {
    let table = normalize_rows(vec![ResultRow::Keyed(KeyedRow::unnamed(vec![json!(1)]))]);

    assert!(table.headers.is_none());
    assert_eq!(table.rows, vec![vec![json!(1)]]);
}

#[test]
fn test_empty_report() {
    let (table, trace) = normalize(RawReport::default());

    assert!(table.headers.is_none());
    assert!(table.is_empty());
    assert_eq!(table.width(), 0);
    assert_eq!(trace.render(), TRACE_PREFIX);
    assert_eq!(trace.render(), "Trace:\n");
}

#[test]
fn test_trace_rendering() {
    let raw = RawReport {
        rows: vec![keyed(json!({"count": 3}))],
        trace: vec![
            TraceStep::from("plan: aggregate orders"),
            TraceStep::from(json!({"step": "scan", "table": "orders", "rows": 42})),
            TraceStep::from(json!("done")),
        ],
    };

    let (table, trace) = normalize(raw);

    assert_eq!(table.headers, Some(vec!["count".to_string()]));
    insta::assert_snapshot!(trace.render(), @r###"
    Trace:
    plan: aggregate orders
    {"step":"scan","table":"orders","rows":42}
    done
    "###);
    assert!(!trace.render().ends_with('\n'));
}

#[test]
fn test_trace_display_matches_render() {
    let trace = ExecutionTrace::from_steps(&[TraceStep::from("one"), TraceStep::from("two")]);

    assert_eq!(trace.to_string(), "Trace:\none\ntwo");
    assert_eq!(trace.to_string(), trace.render());
}
