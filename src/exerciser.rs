//! Smoke-test client that drives both item services in turn.
//!
//! Every request is awaited before the next one is sent. A failed request is
//! logged and the next step still runs.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

use crate::api::{ItemResponse, ItemsResponse};
use crate::config::Instance;
use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::store::Item;

/// HTTP client for one item service.
#[derive(Debug, Clone)]
pub struct ExerciserClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Service base URL, without trailing slash.
    base_url: String,
}

impl ExerciserClient {
    /// Create a client for the service at `base_url`. No timeout is set.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().tcp_nodelay(true).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    /// `GET /items`.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn list_items(&self) -> Result<ItemsResponse> {
        let start = Instant::now();
        let response = self.http.get(self.items_url()).send().await?;
        let items = decode(response).await;
        metrics::record_http_latency(start, "GET /items");
        items
    }

    /// `POST /items` with `item` as the JSON body.
    #[instrument(skip(self, item), fields(base_url = %self.base_url))]
    pub async fn create_item(&self, item: &Value) -> Result<ItemResponse> {
        let start = Instant::now();
        let response = self.http.post(self.items_url()).json(item).send().await?;
        let created = decode(response).await;
        metrics::record_http_latency(start, "POST /items");
        created
    }
}

/// Decode a success body, or turn any other status into an error.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::UnexpectedStatus {
            url,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    debug!(%url, status = status.as_u16(), "Response received");
    Ok(serde_json::from_slice(&bytes)?)
}

/// The three fixed items posted to every service.
pub fn sample_items() -> Vec<Value> {
    vec![
        json!({ "name": "Item 1", "description": "First test item" }),
        json!({ "name": "Item 2", "description": "Second test item" }),
        json!({ "name": "Item 3", "description": "Third test item" }),
    ]
}

/// A service to exercise.
#[derive(Debug, Clone)]
pub struct Target {
    /// Which service this is.
    pub instance: Instance,
    /// Where it listens.
    pub base_url: String,
}

impl Target {
    /// Target a service at its default local URL.
    pub fn local(instance: Instance) -> Self {
        Self {
            instance,
            base_url: instance.default_url(),
        }
    }
}

/// What one service run observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceReport {
    /// Collection before anything was posted.
    pub initial: Option<Vec<Item>>,
    /// Items echoed back by successful posts, in order.
    pub created: Vec<Item>,
    /// Collection after the posts.
    pub after: Option<Vec<Item>>,
    /// One message per failed step, in the order they happened.
    pub failures: Vec<String>,
}

impl ServiceReport {
    /// Whether every step completed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, instance: Instance, err: ServiceError) {
        error!("Error testing {}: {}", instance, err);
        self.failures.push(err.to_string());
    }
}

/// Run the GET / POST x3 / GET sequence against one service.
///
/// A failed step is logged and recorded; the remaining steps still run.
pub async fn exercise_service(target: &Target) -> ServiceReport {
    println!(
        "Testing {} API ({})...\n",
        target.instance, target.base_url
    );

    let mut report = ServiceReport::default();
    let client = match ExerciserClient::new(target.base_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            report.record_failure(target.instance, e);
            return report;
        }
    };

    println!("1. Testing GET /items (initial state):");
    match client.list_items().await {
        Ok(initial) => {
            println!("   Response: {}", render(&initial));
            report.initial = Some(initial.items);
        }
        Err(e) => report.record_failure(target.instance, e),
    }

    println!("\n2. Testing POST /items:");
    for item in sample_items() {
        match client.create_item(&item).await {
            Ok(created) => {
                println!("   Added: {}", render(&created.item));
                report.created.push(created.item);
            }
            Err(e) => report.record_failure(target.instance, e),
        }
    }

    println!("\n3. Testing GET /items (after adding items):");
    match client.list_items().await {
        Ok(after) => {
            println!("   Response: {}", render(&after));
            report.after = Some(after.items);
        }
        Err(e) => report.record_failure(target.instance, e),
    }

    report
}

fn render<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Exercise every target in order; a failing target never skips the next.
pub async fn run_all(targets: &[Target]) -> Vec<ServiceReport> {
    println!("Starting API tests...\n");

    let mut reports = Vec::with_capacity(targets.len());
    for target in targets {
        reports.push(exercise_service(target).await);
        println!();
    }

    println!("API testing completed!");
    println!("\nNote: make sure both services are running before executing this program.");
    for target in targets {
        println!("   {}: {}", target.instance, target.base_url);
    }

    reports
}
