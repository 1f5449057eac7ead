//! Orders API contract tests
//!
//! These tests use wiremock to stand in for the Orders API, so the HTTP
//! shapes (paths, query parameters, bodies) are checked without a backend.

use inkflow::api::{fetch_all_orders, ApiClient, ApiError, OrdersApi, PageSettings};
use inkflow::config::InkflowConfig;
use inkflow::dashboard::{BoardError, TaskBoard, Viewer};
use inkflow::workflow::Stage;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Orders API mock server for deterministic testing
pub struct OrdersApiMock {
    pub server: MockServer,
}

impl OrdersApiMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> InkflowConfig {
        let mut config = InkflowConfig::default();
        config.api.base_url = Some(self.server.uri());
        config.api.token = Some("mock-token".to_string());
        config.api.rate_limit.requests_per_second = 100;
        config.api.rate_limit.burst_capacity = 100;
        config
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config().api).unwrap()
    }

    /// Mock one page of the order list
    pub async fn mock_orders_page(&self, page: u32, limit: u32, orders: Vec<Value>, total: u64) {
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(query_param("page", page.to_string()))
            .and(query_param("limit", limit.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": orders, "total": total})))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_order(&self, order: Value) {
        let id = order["_id"].as_str().unwrap().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/api/orders/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(order))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status_patch(&self, order_id: &str, item_id: &str, body: Value, status: u16) {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/orders/{order_id}/items/{item_id}/status")))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}

fn order(id: &str, item_id: &str, status: &str, assignments: Value) -> Value {
    json!({
        "_id": id,
        "orderNumber": format!("N-{id}"),
        "dueDate": "2026-11-01",
        "customer": {"_id": "cust-1", "firstName": "Mia", "lastName": "Lund"},
        "customerCompany": {"_id": "comp-1", "name": "Nordic Prints"},
        "notes": "deliver to back door",
        "items": [{
            "_id": item_id,
            "product": {"_id": "prod-1", "name": "Poster A2"},
            "productNameSnapshot": "Poster A2",
            "quantity": 25,
            "itemStatus": status,
            "disabledStages": ["CUTTING"],
            "assignments": assignments
        }]
    })
}

fn paging(page_size: u32, max_pages: u32) -> PageSettings {
    PageSettings {
        page_size,
        max_pages,
        ..PageSettings::default()
    }
}

#[tokio::test]
async fn test_pages_are_concatenated_until_short_page() {
    let mock = OrdersApiMock::new().await;
    mock.mock_orders_page(1, 2, vec![order("o1", "i1", "TO_DO", json!([])), order("o2", "i2", "TO_DO", json!([]))], 3)
        .await;
    mock.mock_orders_page(2, 2, vec![order("o3", "i3", "TO_DO", json!([]))], 3).await;

    let orders = fetch_all_orders(&mock.client(), &paging(2, 10)).await.unwrap();

    let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["o1", "o2", "o3"]);
}

#[tokio::test]
async fn test_paging_stops_at_page_cap() {
    let mock = OrdersApiMock::new().await;
    mock.mock_orders_page(1, 1, vec![order("o1", "i1", "TO_DO", json!([]))], 10).await;
    mock.mock_orders_page(2, 1, vec![order("o2", "i2", "TO_DO", json!([]))], 10).await;

    let orders = fetch_all_orders(&mock.client(), &paging(1, 2)).await.unwrap();

    assert_eq!(orders.len(), 2);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mock = OrdersApiMock::new().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/o1"))
        .and(header("authorization", "Bearer mock-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order("o1", "i1", "PRINTING", json!([]))))
        .expect(1)
        .mount(&mock.server)
        .await;

    let fetched = mock.client().fetch_order("o1").await.unwrap();
    assert_eq!(fetched.item("i1").unwrap().item_status, Stage::Printing);
}

#[tokio::test]
async fn test_missing_order_maps_to_not_found() {
    let mock = OrdersApiMock::new().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock.server)
        .await;

    let err = mock.client().fetch_order("nope").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_status_update_falls_back_to_legacy_payload() {
    let mock = OrdersApiMock::new().await;
    mock.mock_orders_page(1, 50, vec![order("o1", "i1", "PRINTING", json!([]))], 1).await;
    mock.mock_status_patch("o1", "i1", json!({"itemStatus": "FINISHING"}), 500).await;
    mock.mock_status_patch("o1", "i1", json!({"stage": "FINISHING"}), 200).await;

    let mut board = TaskBoard::new(mock.client(), Viewer::admin("boss"));
    board.refresh(&PageSettings::default()).await.unwrap();

    board.update_status("o1", "i1", Stage::Finishing).await.unwrap();

    assert_eq!(board.task("o1", "i1").unwrap().current_stage, Stage::Finishing);
}

#[tokio::test]
async fn test_status_update_double_failure_keeps_local_state() {
    let mock = OrdersApiMock::new().await;
    mock.mock_orders_page(1, 50, vec![order("o1", "i1", "PRINTING", json!([]))], 1).await;
    mock.mock_status_patch("o1", "i1", json!({"itemStatus": "FINISHING"}), 500).await;
    mock.mock_status_patch("o1", "i1", json!({"stage": "FINISHING"}), 422).await;

    let mut board = TaskBoard::new(mock.client(), Viewer::admin("boss"));
    board.refresh(&PageSettings::default()).await.unwrap();

    let err = board.update_status("o1", "i1", Stage::Finishing).await.unwrap_err();

    assert!(matches!(err, BoardError::Api(ApiError::Status { status: 422, .. })));
    assert_eq!(board.task("o1", "i1").unwrap().current_stage, Stage::Printing);
}

#[tokio::test]
async fn test_self_assign_puts_normalized_order() {
    let mock = OrdersApiMock::new().await;
    let unassigned = order("o1", "i1", "PRINTING", json!([]));
    mock.mock_orders_page(1, 50, vec![unassigned.clone()], 1).await;
    mock.mock_order(unassigned).await;

    Mock::given(method("PUT"))
        .and(path("/api/orders/o1"))
        .and(body_partial_json(json!({
            "_id": "o1",
            "customer": "cust-1",
            "customerCompany": "comp-1",
            "notes": "deliver to back door",
            "items": [{
                "_id": "i1",
                "product": "prod-1",
                "assignments": [{"stage": "PRINTING", "assignedTo": "u2", "isActive": true}]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let mut board = TaskBoard::new(mock.client(), Viewer::employee("u2"));
    board.refresh(&PageSettings::default()).await.unwrap();
    assert!(board.task("o1", "i1").unwrap().is_unassigned);

    board.self_assign("o1", "i1", Some(Stage::Printing)).await.unwrap();

    let task = board.task("o1", "i1").unwrap();
    assert_eq!(task.assigned_to, "u2");
    assert!(!task.is_unassigned);
}

#[tokio::test]
async fn test_self_assign_failure_leaves_task_unclaimed() {
    let mock = OrdersApiMock::new().await;
    let unassigned = order("o1", "i1", "PRINTING", json!([]));
    mock.mock_orders_page(1, 50, vec![unassigned.clone()], 1).await;
    mock.mock_order(unassigned).await;

    Mock::given(method("PUT"))
        .and(path("/api/orders/o1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock.server)
        .await;

    let mut board = TaskBoard::new(mock.client(), Viewer::employee("u2"));
    board.refresh(&PageSettings::default()).await.unwrap();

    let err = board.self_assign("o1", "i1", Some(Stage::Printing)).await.unwrap_err();

    assert!(matches!(err, BoardError::Api(ApiError::Status { status: 500, .. })));
    let task = board.task("o1", "i1").unwrap();
    assert!(task.is_unassigned);
}

#[tokio::test]
async fn test_board_survives_undecodable_orders() {
    let mock = OrdersApiMock::new().await;
    let mut deleted_product = order("o2", "i2", "PRINTING", json!([]));
    deleted_product["items"][0]["product"] = Value::Null;
    deleted_product["items"][0]["productNameSnapshot"] = Value::Null;
    let mut unknown_stage = order("o3", "i3", "PRINTING", json!([]));
    unknown_stage["items"][0]["itemStatus"] = json!("QUALITY_CHECK");
    mock.mock_orders_page(
        1,
        50,
        vec![order("o1", "i1", "PRINTING", json!([])), deleted_product, unknown_stage],
        3,
    )
    .await;

    let mut board = TaskBoard::new(mock.client(), Viewer::admin("boss"));
    let count = board.refresh(&PageSettings::default()).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(board.task("o2", "i2").unwrap().product_name, "Unknown product");
    assert!(board.task("o3", "i3").is_none());
}
