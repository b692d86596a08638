use querydeck::model::{
    SuggestionAdapter, SuggestionRecord, NO_SUGGESTION_LABEL, UNNAMED_SHAPE_LABEL,
};

fn records() -> Vec<SuggestionRecord> {
    serde_json::from_value(serde_json::json!([
        {"description": "Revenue by region", "metrics": ["SUM(amount)"]},
        {"grain": "day"},
        {"description": "Orders per customer"}
    ]))
    .unwrap()
}

#[test]
fn test_descriptors_follow_record_order() {
    let adapter = SuggestionAdapter::from_raw(records());

    let labels: Vec<(usize, &str)> = adapter
        .descriptors()
        .iter()
        .map(|d| (d.index, d.label.as_str()))
        .collect();

    assert_eq!(
        labels,
        vec![
            (0, "Revenue by region"),
            (1, UNNAMED_SHAPE_LABEL),
            (2, "Orders per customer"),
        ]
    );
}

#[test]
fn test_labels_start_with_sentinel() {
    let adapter = SuggestionAdapter::from_raw(records());
    let labels: Vec<&str> = adapter.labels().collect();

    assert_eq!(labels.len(), 4);
    assert_eq!(labels[0], NO_SUGGESTION_LABEL);
    assert_eq!(labels[2], "(unnamed shape)");
}

#[test]
fn test_resolve_is_offset_by_sentinel() {
    let adapter = SuggestionAdapter::from_raw(records());

    assert!(adapter.resolve(0).is_none());
    assert_eq!(adapter.resolve(2).unwrap().extra["grain"], "day");
    assert_eq!(
        adapter.resolve(3).unwrap().description.as_deref(),
        Some("Orders per customer")
    );
    assert!(adapter.resolve(4).is_none());
}

#[test]
fn test_empty_list_only_has_sentinel() {
    let adapter = SuggestionAdapter::from_raw(Vec::new());

    assert!(adapter.is_empty());
    assert_eq!(adapter.labels().collect::<Vec<_>>(), vec![NO_SUGGESTION_LABEL]);
    assert!(adapter.resolve(1).is_none());
}

#[test]
fn test_empty_description_is_unnamed() {
    let records: Vec<SuggestionRecord> =
        serde_json::from_value(serde_json::json!([{"description": ""}, {"description": null}]))
            .unwrap();
    let adapter = SuggestionAdapter::from_raw(records);

    assert_eq!(adapter.descriptors()[0].label, UNNAMED_SHAPE_LABEL);
    assert_eq!(adapter.descriptors()[1].label, UNNAMED_SHAPE_LABEL);
    assert_eq!(adapter.resolve(1).unwrap().description.as_deref(), Some(""));
}
