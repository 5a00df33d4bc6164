//! Handler tests for Products domain
//!
//! These tests drive the products router over the in-memory repository:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use test_utils::assertions::assert_error_message;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = ProductService::new(InMemoryProductRepository::new());
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, body: Value) -> Product {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn list(app: &Router, uri: &str) -> Vec<Product> {
    let response = app.clone().oneshot(get(uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

fn pen() -> Value {
    json!({
        "name": "Pen",
        "description": "Blue ink",
        "price": 1000,
        "quantity": 50,
        "category": "Office",
        "supplier": "Acme"
    })
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &pen()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert!(body["_id"].is_string());
    assert_eq!(body["name"], "Pen");
    assert_eq!(body["price"], 1000.0);
    assert_eq!(body["quantity"], 50);
    assert!(body["createdAt"].is_string());
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_create_trims_and_casts_form_values() {
    let app = app();
    let product = create(
        &app,
        json!({
            "name": "  Stapler  ",
            "description": " Heavy duty ",
            "price": "25.5",
            "quantity": "7",
            "category": "Office",
            "supplier": "Acme"
        }),
    )
    .await;

    assert_eq!(product.name, "Stapler");
    assert_eq!(product.description, "Heavy duty");
    assert_eq!(product.price, 25.5);
    assert_eq!(product.quantity, 7);
}

#[tokio::test]
async fn test_create_missing_fields_returns_400() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &json!({ "name": "Pen" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "MISSING_FIELDS");
    assert_eq!(
        body["details"]["fields"],
        json!(["description", "price", "quantity", "category", "supplier"])
    );

    // Nothing was stored
    assert!(list(&app, "/").await.is_empty());
}

#[tokio::test]
async fn test_create_negative_values_returns_every_violation() {
    let app = app();
    let mut body = pen();
    body["price"] = json!(-1);
    body["quantity"] = json!(-2);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_error_message(&body, "Price cannot be negative, Quantity cannot be negative");
    assert_eq!(body["details"][0]["field"], "price");
}

#[tokio::test]
async fn test_create_non_numeric_price_returns_400() {
    let app = app();
    let mut body = pen();
    body["price"] = json!("abc");

    let response = app.oneshot(json_request("POST", "/", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_error_message(&body, "Price must be a number");
}

#[tokio::test]
async fn test_create_duplicate_name_returns_409() {
    let app = app();
    create(&app, pen()).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", &pen()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = json_body(response.into_body()).await;
    assert_error_message(&body, "Product with name 'Pen' already exists");
    assert_eq!(list(&app, "/").await.len(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_get_product_by_id() {
    let app = app();
    let created = create(&app, pen()).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids_return_404() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("get_unknown");

    for uri in [format!("/{}", builder.unknown_id()), "/not-a-valid-id".to_string()] {
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");

        let body: Value = json_body(response.into_body()).await;
        assert_error_message(&body, "Product not found");
    }
}

#[tokio::test]
async fn test_list_filters_by_keyword_and_category() {
    let app = app();
    create(&app, pen()).await;

    let mut stapler = pen();
    stapler["name"] = json!("Stapler");
    stapler["description"] = json!("Pen-friendly stapler");
    stapler["category"] = json!("Tools");
    create(&app, stapler).await;

    let mut chair = pen();
    chair["name"] = json!("Chair");
    chair["description"] = json!("Ergonomic");
    create(&app, chair).await;

    assert_eq!(list(&app, "/").await.len(), 3);
    assert_eq!(list(&app, "/?keyword=").await.len(), 3);
    assert_eq!(list(&app, "/?keyword=PEN").await.len(), 2);
    assert_eq!(list(&app, "/?keyword=pen&category=Office").await.len(), 1);
    assert_eq!(list(&app, "/search?keyword=ergo").await.len(), 1);
    assert!(list(&app, "/?keyword=.*").await.is_empty());
}

#[tokio::test]
async fn test_keyword_whitespace_is_part_of_the_match() {
    let app = app();
    let mut lamp = pen();
    lamp["name"] = json!("Desk lamp");
    lamp["description"] = json!("Warm light");
    create(&app, lamp).await;

    let mut desk = pen();
    desk["name"] = json!("Standing Desk");
    desk["description"] = json!("Adjustable");
    create(&app, desk).await;

    let names = |products: Vec<Product>| {
        products
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names(list(&app, "/?keyword=desk%20").await), ["Desk lamp"]);
    assert_eq!(names(list(&app, "/?keyword=%20desk").await), ["Standing Desk"]);
    assert_eq!(
        names(list(&app, "/search?keyword=%20").await),
        ["Desk lamp", "Standing Desk"]
    );

    let mut hammer = pen();
    hammer["name"] = json!("Hammer");
    hammer["description"] = json!("Steel");
    create(&app, hammer).await;
    assert_eq!(list(&app, "/?keyword=%20").await.len(), 2);
    assert_eq!(list(&app, "/?keyword=").await.len(), 3);
}

#[tokio::test]
async fn test_huge_low_stock_threshold_returns_everything() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("huge_threshold");
    create(&app, builder.product("a", 3)).await;
    create(&app, builder.product("b", 5000)).await;

    assert_eq!(
        list(&app, "/low-stock?threshold=99999999999999999999").await.len(),
        2
    );
}

#[tokio::test]
async fn test_category_filter_agrees_across_routes() {
    let app = app();
    create(&app, pen()).await;

    assert_eq!(list(&app, "/?category=Office").await.len(), 1);
    assert!(list(&app, "/?category=%20Office").await.is_empty());
    assert!(list(&app, "/category/%20Office").await.is_empty());
}

#[tokio::test]
async fn test_get_by_category_is_exact() {
    let app = app();
    create(&app, pen()).await;

    assert_eq!(list(&app, "/category/Office").await.len(), 1);
    assert!(list(&app, "/category/office").await.is_empty());
    assert!(list(&app, "/category/Unknown").await.is_empty());
}

#[tokio::test]
async fn test_low_stock_threshold() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("low_stock");
    create(&app, builder.product("a", 3)).await;
    create(&app, builder.product("b", 10)).await;
    create(&app, builder.product("c", 50)).await;

    assert_eq!(list(&app, "/low-stock").await.len(), 1);
    assert_eq!(list(&app, "/low-stock?threshold=abc").await.len(), 1);
    assert_eq!(list(&app, "/low-stock?threshold=11").await.len(), 2);
    assert!(list(&app, "/low-stock?threshold=3").await.is_empty());
}

#[tokio::test]
async fn test_update_product_partial() {
    let app = app();
    let created = create(&app, pen()).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            &json!({ "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.name, "Pen");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    assert_eq!(list(&app, "/low-stock").await.len(), 1);
}

#[tokio::test]
async fn test_update_validation_and_conflicts() {
    let app = app();
    let created = create(&app, pen()).await;
    let mut marker = pen();
    marker["name"] = json!("Marker");
    create(&app, marker).await;

    let uri = format!("/{}", created.id);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, &json!({ "price": -3 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, &json!({ "name": "Marker" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/not-a-valid-id", &json!({ "quantity": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product() {
    let app = app();
    let created = create(&app, pen()).await;
    let uri = format!("/{}", created.id);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product deleted successfully");

    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_inventory_scenario() {
    let app = app();

    let pen = create(&app, pen()).await;
    let listed = list(&app, "/").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, pen.id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", pen.id),
            &json!({ "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let low = list(&app, "/low-stock").await;
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].quantity, 5);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", pen.id))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.clone().oneshot(request).await.unwrap().status(), StatusCode::OK);

    assert!(list(&app, "/").await.is_empty());
}
