use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mockito::Matcher;
use storefront::{router, AppState, Config};
use tower::ServiceExt;

const LISTING: &str = r#"[
    {"id":"1","title":"Alpha Lamp","image":"https://img.example.com/1.png","amazonUrl":"https://www.amazon.com/dp/1","description":""},
    {"id":"2","title":"Bravo Mug","image":"https://img.example.com/2.png","amazonUrl":"https://www.amazon.com/dp/2","description":"Holds apple cider"}
]"#;

fn app_for(server: &mockito::Server) -> Router {
    let mut config = Config::default();
    config.catalog.base_url = server.url();
    config.catalog.timeout_seconds = Some(5);
    let state = AppState::new(&config).unwrap();
    router(state, Duration::from_secs(30))
}

async fn listing(server: &mut mockito::Server, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, body: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_storefront_search_renders_matching_cards_only() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let app = app_for(&server);

    let (status, body) = get(&app, "/?q=APP").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("class=\"product-card\"").count(), 1);
    assert!(body.contains("Bravo Mug"));
    assert!(!body.contains("Alpha Lamp"));
    assert!(body.contains("Buy on Amazon"));

    let (_, body) = get(&app, "/").await;
    assert_eq!(body.matches("class=\"product-card\"").count(), 2);
}

#[tokio::test]
async fn test_storefront_empty_collection_shows_notice() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, r#"{"data":[]}"#).await;
    let app = app_for(&server);

    let (status, body) = get(&app, "/?q=anything").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found. Check back soon!"));
    assert_eq!(body.matches("class=\"product-card\"").count(), 0);
}

#[tokio::test]
async fn test_storefront_render_is_repeatable_and_escaped() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(
        &mut server,
        r#"[{"id":"9","title":"<b>Bold</b>","image":"x","amazonUrl":"https://www.amazon.com/x","description":"d"}]"#,
    )
    .await;
    let app = app_for(&server);

    let (_, first) = get(&app, "/").await;
    let (_, second) = get(&app, "/").await;
    assert_eq!(first, second);
    assert!(!first.contains("<b>Bold</b>"));
    assert!(first.contains("&lt;b&gt;Bold"));
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;
    let app = app_for(&server);

    let (status, body) = get(&app, "/admin").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "UPSTREAM_ERROR");
    assert_eq!(json["code"], 502);
}

#[tokio::test]
async fn test_add_with_bad_amazon_url_is_rejected_without_create() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let create = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = app_for(&server);

    let response = post_form(
        &app,
        "/admin/products",
        "title=Retained+Title&image=https%3A%2F%2Fimg.example.com%2Fn.png\
         &amazonUrl=http%3A%2F%2Famazon.com%2Fx&description=Something",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("role=\"alert\""));
    assert!(body.contains("Amazon URL must start with"));
    assert!(body.contains("value=\"Retained Title\""));
    create.assert_async().await;
}

#[tokio::test]
async fn test_add_with_missing_field_is_rejected_without_create() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let create = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = app_for(&server);

    let response = post_form(
        &app,
        "/admin/products",
        "title=+++&image=i&amazonUrl=https%3A%2F%2Fwww.amazon.com%2Fx&description=d",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Please fill all fields!"));
    create.assert_async().await;
}

#[tokio::test]
async fn test_add_success_redirects_and_shows_notice() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let create = server
        .mock("POST", "/")
        .match_body(Matcher::Json(serde_json::json!([{
            "title": "New Kettle",
            "image": "https://img.example.com/k.png",
            "amazonUrl": "https://www.amazon.com/dp/K",
            "description": "Boils water"
        }])))
        .with_status(201)
        .with_body(r#"{"created":1}"#)
        .expect(1)
        .create_async()
        .await;
    let app = app_for(&server);

    let response = post_form(
        &app,
        "/admin/products",
        "q=mug&title=+New+Kettle+&image=https%3A%2F%2Fimg.example.com%2Fk.png\
         &amazonUrl=https%3A%2F%2Fwww.amazon.com%2Fdp%2FK&description=Boils+water",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    // 新增成功后清空搜索条件
    assert_eq!(location(&response), "/admin");

    let (_, body) = get(&app, "/admin").await;
    assert!(body.contains("Product added successfully!"));
    create.assert_async().await;
}

#[tokio::test]
async fn test_edit_form_flow_keeps_single_form_and_search() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let patch = server
        .mock("PATCH", "/id/2")
        .match_body(Matcher::Json(serde_json::json!({
            "title": "Bravo Mug XL",
            "image": "https://img.example.com/2.png",
            "amazonUrl": "https://www.amazon.com/dp/2",
            "description": "Holds apple cider"
        })))
        .with_status(200)
        .with_body(r#"{"updated":1}"#)
        .expect(1)
        .create_async()
        .await;
    let app = app_for(&server);

    let response = post_form(&app, "/admin/products/1/edit", "q=").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = post_form(&app, "/admin/products/2/edit", "q=apple").await;
    assert_eq!(location(&response), "/admin?q=apple#product-2");

    let (_, body) = get(&app, "/admin").await;
    assert_eq!(body.matches("class=\"edit-form\"").count(), 1);
    assert!(body.contains("value=\"Bravo Mug\""));

    let response = post_form(
        &app,
        "/admin/products/2",
        "q=apple&title=Bravo+Mug+XL&image=https%3A%2F%2Fimg.example.com%2F2.png\
         &amazonUrl=https%3A%2F%2Fwww.amazon.com%2Fdp%2F2&description=Holds+apple+cider",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin?q=apple");

    let (_, body) = get(&app, "/admin?q=apple").await;
    assert_eq!(body.matches("class=\"edit-form\"").count(), 0);
    patch.assert_async().await;
}

#[tokio::test]
async fn test_rejected_edit_keeps_form_open_without_patch() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let patch = server
        .mock("PATCH", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = app_for(&server);

    post_form(&app, "/admin/products/1/edit", "q=").await;
    let response = post_form(
        &app,
        "/admin/products/1",
        "q=&title=Typed+Title&image=i&amazonUrl=https%3A%2F%2Fwww.ebay.com%2Fx&description=d",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(body.matches("class=\"edit-form\"").count(), 1);
    assert!(body.contains("value=\"Typed Title\""));
    assert!(body.contains("Amazon URL must start with"));
    patch.assert_async().await;
}

#[tokio::test]
async fn test_cancel_closes_form() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let app = app_for(&server);

    post_form(&app, "/admin/products/2/edit", "q=").await;
    let response = post_form(&app, "/admin/products/2/cancel", "q=mug").await;
    assert_eq!(location(&response), "/admin?q=mug");

    let (_, body) = get(&app, "/admin").await;
    assert_eq!(body.matches("class=\"edit-form\"").count(), 0);
}

#[tokio::test]
async fn test_delete_preserves_search() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let delete = server
        .mock("DELETE", "/id/1")
        .with_status(200)
        .with_body(r#"{"deleted":1}"#)
        .expect(1)
        .create_async()
        .await;
    let app = app_for(&server);

    let response = post_form(&app, "/admin/products/1/delete", "q=lamp").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin?q=lamp");
    delete.assert_async().await;
}

#[tokio::test]
async fn test_admin_empty_notice() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, "[]").await;
    let app = app_for(&server);

    let (status, body) = get(&app, "/admin").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found."));
    assert_eq!(body.matches("class=\"admin-card\"").count(), 0);
}

#[tokio::test]
async fn test_api_products_and_health() {
    let mut server = mockito::Server::new_async().await;
    let _m = listing(&mut server, LISTING).await;
    let app = app_for(&server);

    let (status, body) = get(&app, "/api/products?q=cider").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["amazonUrl"], "https://www.amazon.com/dp/2");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
}
