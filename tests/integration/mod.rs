//! Integration tests for the item services.
//!
//! Each test starts real services on ephemeral ports and talks to them over
//! HTTP.
//!
//! Run with: cargo test --test integration

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use item_service::api::handlers::create_item;
use item_service::exerciser::{exercise_service, run_all, sample_items, ExerciserClient, Target};
use item_service::{server, Config, Instance, ItemStore, ServiceError};

/// A running service that stops when dropped.
struct TestService {
    addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestService {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async {
                rx.await.ok();
            };
            server::serve(listener, ItemStore::new(), shutdown).await
        });

        Self {
            addr,
            _shutdown: tx,
        }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn client(&self) -> ExerciserClient {
        ExerciserClient::new(self.url()).unwrap()
    }
}

/// An address nothing is listening on.
async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn values(items: Vec<serde_json::Map<String, Value>>) -> Vec<Value> {
    items.into_iter().map(Value::Object).collect()
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let service = TestService::start().await;
    let client = service.client();

    let initial = client.list_items().await.unwrap();
    assert!(initial.items.is_empty());

    let item = json!({"name": "Item 1", "description": "First test item"});
    let created = client.create_item(&item).await.unwrap();
    assert_eq!(Value::Object(created.item), item);

    let after = client.list_items().await.unwrap();
    assert_eq!(values(after.items), vec![item]);
}

#[tokio::test]
async fn test_last_item_matches_posted_object() {
    let service = TestService::start().await;
    let client = service.client();

    let objects = [
        json!({}),
        json!({"nested": {"deep": [1, 2, {"x": null}]}}),
        json!({"unicode": "héllo", "number": 1.5, "flag": false}),
    ];

    for (n, object) in objects.iter().enumerate() {
        client.create_item(object).await.unwrap();
        let listed = values(client.list_items().await.unwrap().items);
        assert_eq!(listed.len(), n + 1);
        assert_eq!(listed.last(), Some(object));
    }
}

#[tokio::test]
async fn test_non_object_bodies_leave_collection_unchanged() {
    let service = TestService::start().await;
    let client = service.client();

    client.create_item(&json!({"keep": true})).await.unwrap();

    for body in [json!(null), json!([1, 2]), json!("string"), json!(7)] {
        let err = client.create_item(&body).await.unwrap_err();
        match err {
            ServiceError::UnexpectedStatus { status, body, .. } => {
                assert_eq!(status, 400);
                let parsed: Value = serde_json::from_str(&body).unwrap();
                assert_eq!(parsed, json!({"error": "Invalid item"}));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(client.list_items().await.unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_instances_never_share_state() {
    let a = TestService::start().await;
    let b = TestService::start().await;

    a.client()
        .create_item(&json!({"owner": "a"}))
        .await
        .unwrap();

    assert!(b.client().list_items().await.unwrap().items.is_empty());
    assert_eq!(a.client().list_items().await.unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_exercise_service_runs_full_sequence() {
    let service = TestService::start().await;
    let target = Target {
        instance: Instance::RunA,
        base_url: service.url(),
    };

    let report = exercise_service(&target).await;

    assert!(report.is_success(), "failures: {:?}", report.failures);
    assert_eq!(report.initial, Some(vec![]));
    assert_eq!(values(report.created), sample_items());
    assert_eq!(report.after.map(values), Some(sample_items()));
}

#[tokio::test]
async fn test_failed_list_does_not_skip_posts() {
    // Service that only accepts POST, so both GET steps fail with 405.
    let store = ItemStore::new();
    let router = axum::Router::new()
        .route("/items", axum::routing::post(create_item))
        .with_state(store.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });

    let target = Target {
        instance: Instance::RunB,
        base_url: format!("http://{}", addr),
    };
    let report = exercise_service(&target).await;

    assert_eq!(report.initial, None);
    assert_eq!(report.after, None);
    assert_eq!(values(report.created), sample_items());
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| f.contains("405")));
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_failing_service_does_not_stop_the_next() {
    let run_b = TestService::start().await;
    let targets = [
        Target {
            instance: Instance::RunA,
            base_url: dead_url().await,
        },
        Target {
            instance: Instance::RunB,
            base_url: run_b.url(),
        },
    ];

    let reports = run_all(&targets).await;

    assert_eq!(reports.len(), 2);
    assert!(!reports[0].is_success());
    assert_eq!(reports[0].initial, None);
    // initial GET, three POSTs and the final GET each failed on their own
    assert_eq!(reports[0].failures.len(), 5);
    assert!(reports[1].is_success());
    assert_eq!(
        values(run_b.client().list_items().await.unwrap().items),
        sample_items()
    );
}

#[tokio::test]
async fn test_cross_origin_header_is_sent() {
    let service = TestService::start().await;

    let response = reqwest::Client::new()
        .get(format!("{}/items", service.url()))
        .header("Origin", "http://somewhere.else")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_run_rejects_port_zero() {
    let config = Config { port: Some(0) };
    let result = server::run(Instance::RunA, &config).await;
    assert!(matches!(result, Err(ServiceError::InvalidConfig(_))));
}
