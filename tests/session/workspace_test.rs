mod common;

use common::FakeBackend;
use querydeck::model::{FilterOp, FilterSpec};
use querydeck::session::{SessionError, Workspace};

#[tokio::test]
async fn test_new_workspace_is_not_connected() {
    let mut workspace = Workspace::new();

    assert!(!workspace.is_connected());
    assert!(matches!(workspace.session_mut(), Err(SessionError::NotConnected)));
    assert!(matches!(
        workspace.select_table("orders").await,
        Err(SessionError::NotConnected)
    ));
    assert!(matches!(workspace.run().await, Err(SessionError::NotConnected)));
}

#[tokio::test]
async fn test_select_table_and_run() {
    let (fake, backend) = FakeBackend::shop().into_backend();
    let mut workspace = Workspace::new();
    workspace.connect("./shop.db", backend).await.unwrap();

    workspace.select_table("orders").await.unwrap();
    assert_eq!(workspace.builder().base_table(), Some("orders"));
    assert_eq!(workspace.builder().catalog().len(), 3);
    assert_eq!(workspace.builder().suggestions().len(), 1);

    let builder = workspace.builder_mut();
    builder.set_group_by("region", true);
    let row = builder.add_filter();
    builder.select_filter_column(row, "amount");
    builder.set_filter_op(row, Some(FilterOp::Gt));
    builder.set_filter_value(row, "100");

    let (spec, outcome) = workspace.run().await.unwrap();

    assert_eq!(spec.name, "gui_orders");
    assert_eq!(
        spec.filters,
        vec![FilterSpec::new("orders.amount", FilterOp::Gt, "100")]
    );
    assert_eq!(outcome.table.rows.len(), 2);
    assert_eq!(fake.recorded_specs(), vec![spec]);
}

#[tokio::test]
async fn test_select_table_survives_suggestion_failure() {
    let fake = FakeBackend {
        fail_suggest_for: Some("orders".to_string()),
        ..FakeBackend::shop()
    };
    let (_, backend) = fake.into_backend();
    let mut workspace = Workspace::new();
    workspace.connect("./shop.db", backend).await.unwrap();

    workspace.select_table("orders").await.unwrap();

    assert!(workspace.builder().suggestions().is_empty());
    assert_eq!(workspace.builder().group_by().len(), 3);
}

#[tokio::test]
async fn test_select_unknown_table_has_no_columns() {
    let (_, backend) = FakeBackend::shop().into_backend();
    let mut workspace = Workspace::new();
    workspace.connect("./shop.db", backend).await.unwrap();

    workspace.select_table("invoices").await.unwrap();

    assert_eq!(workspace.builder().base_table(), Some("invoices"));
    assert!(workspace.builder().catalog().is_empty());
    assert_eq!(workspace.builder().build().name, "gui_invoices");
}

#[tokio::test]
async fn test_connect_resets_builder() {
    let (_, first) = FakeBackend::shop().into_backend();
    let (_, second) = FakeBackend::shop().into_backend();
    let mut workspace = Workspace::with_default_limit(50);
    workspace.connect("./shop.db", first).await.unwrap();
    workspace.select_table("orders").await.unwrap();
    workspace.builder_mut().set_limit(7);

    workspace.connect("./archive.db", second).await.unwrap();

    assert_eq!(workspace.session().map(|s| s.target()), Some("./archive.db"));
    assert!(workspace.builder().base_table().is_none());
    assert!(workspace.builder().metrics().is_empty());
    assert_eq!(workspace.builder().limit(), 50);
}

#[tokio::test]
async fn test_failed_connect_keeps_state() {
    let (_, good) = FakeBackend::shop().into_backend();
    let broken = FakeBackend::shop();
    broken.set_fail_reflect(true);
    let (_, broken) = broken.into_backend();

    let mut workspace = Workspace::new();
    workspace.connect("./shop.db", good).await.unwrap();
    workspace.select_table("orders").await.unwrap();

    let err = workspace.connect("./broken.db", broken).await.unwrap_err();

    assert!(matches!(err, SessionError::Connection { .. }));
    assert_eq!(workspace.session().map(|s| s.target()), Some("./shop.db"));
    assert_eq!(workspace.builder().base_table(), Some("orders"));
}

#[tokio::test]
async fn test_run_failure_surfaces_execution_error() {
    let fake = FakeBackend {
        fail_run: Some("syntax error".to_string()),
        ..FakeBackend::shop()
    };
    let (_, backend) = fake.into_backend();
    let mut workspace = Workspace::new();
    workspace.connect("./shop.db", backend).await.unwrap();
    workspace.select_table("orders").await.unwrap();

    let err = workspace.run().await.unwrap_err();

    assert!(matches!(err, SessionError::Execution(_)));
}
