//! Integration tests for the shopping REST surface.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use shopping::{
    AppState, InMemoryOrderStore, InMemoryPaymentGateway, InMemoryProductStore,
    OrderOrchestrator, ProductCatalog,
};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

struct TestApp {
    app: axum::Router,
    payments: Arc<InMemoryPaymentGateway>,
    orders: InMemoryOrderStore,
}

fn setup() -> TestApp {
    let payments = Arc::new(InMemoryPaymentGateway::new());
    let orders = InMemoryOrderStore::new();
    let state = Arc::new(AppState {
        orders: OrderOrchestrator::new(Arc::new(orders.clone()), payments.clone(), 10_000),
        catalog: ProductCatalog::new(Arc::new(InMemoryProductStore::new())),
    });
    TestApp {
        app: shopping::create_app(state, get_metrics_handle()),
        payments,
        orders,
    }
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let t = setup();
    let response = t.app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_create_transaction_happy_path() {
    let t = setup();
    let response = t
        .app
        .oneshot(json_request(
            "POST",
            "/transactions",
            serde_json::json!({"email": "a@b.com", "product_id": "p1", "quantity": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["message"], "transaction created");
    assert_eq!(json["data"]["status"], "success");
    assert_eq!(json["data"]["payment_id"], "pay1");
    assert_eq!(json["data"]["total"], 20000);
    assert_eq!(t.payments.last_request().await, Some(("a@b.com".into(), 20000)));
}

#[tokio::test]
async fn test_create_transaction_validation_envelope() {
    let t = setup();
    let response = t
        .app
        .oneshot(json_request(
            "POST",
            "/transactions",
            serde_json::json!({"email": "nope", "product_id": "p1", "quantity": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"error": {"code": 400, "message": "invalid email format"}})
    );
    assert_eq!(t.payments.call_count().await, 0);
}

#[tokio::test]
async fn test_declined_payment_is_recorded() {
    let t = setup();
    t.payments.set_decline(true).await;

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions",
            serde_json::json!({"email": "a@b.com", "product_id": "p1", "quantity": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json_body(response).await["error"]["code"], 402);

    let response = t
        .app
        .oneshot(empty_request("GET", "/transactions"))
        .await
        .unwrap();
    let list = json_body(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["status"], "failed");
    assert!(list[0]["payment_id"].is_null());
}

#[tokio::test]
async fn test_unreachable_ledger_is_bad_gateway() {
    let t = setup();
    t.payments.set_unreachable(true).await;

    let response = t
        .app
        .oneshot(json_request(
            "POST",
            "/transactions",
            serde_json::json!({"email": "a@b.com", "product_id": "p1", "quantity": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "payment service not reachable"
    );
    assert_eq!(t.orders.order_count().await, 0);
}

#[tokio::test]
async fn test_transaction_get_update_delete() {
    let t = setup();
    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions",
            serde_json::json!({"email": "a@b.com", "product_id": "p1", "quantity": 1}),
        ))
        .await
        .unwrap();
    let id = json_body(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/transactions/{id}");

    let response = t.app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["quantity"], 1);

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            serde_json::json!({"email": "a@b.com", "product_id": "p1", "quantity": 4}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], "transaction updated");
    assert_eq!(json["data"]["total"], 40000);

    let response = t
        .app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["message"], "transaction deleted");

    let response = t.app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "transaction not found"
    );
}

#[tokio::test]
async fn test_invalid_transaction_id() {
    let t = setup();
    let response = t
        .app
        .oneshot(empty_request("GET", "/transactions/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "invalid transaction id"
    );
}

#[tokio::test]
async fn test_product_crud() {
    let t = setup();

    let response = t
        .app
        .clone()
        .oneshot(empty_request("GET", "/products"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, serde_json::json!([]));

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/products",
            serde_json::json!({"name": "Mug", "price": 1500, "stock": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["message"], "product created");
    let uri = format!("/products/{}", created["data"]["id"].as_str().unwrap());

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            serde_json::json!({"name": "Mug", "price": 1500, "stock": -1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "stock must be >= 0"
    );

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            serde_json::json!({"name": "Mug", "price": 1200, "stock": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["data"]["price"], 1200);

    let response = t
        .app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = t.app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body() {
    let t = setup();
    let response = t
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/products")
                .header("content-type", "application/json")
                .body(Body::from("{oops"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "invalid request body"
    );
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let t = setup();
    let response = t.app.oneshot(empty_request("GET", "/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
