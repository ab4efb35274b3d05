use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::content::catalog::ContentCatalog;
use crate::content::router::content_router;

async fn catalog() -> Arc<ContentCatalog> {
    Arc::new(ContentCatalog::load(&content_source(), 3).await)
}

async fn get(uri: &str) -> Response {
    content_router(catalog().await)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn faq_route_filters_by_query_and_category() {
    let response = get("/api/v1/faqs?q=recycle&category=Recycling").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "faq-2");
}

#[tokio::test]
async fn blank_category_parameter_is_ignored() {
    let body = json_body(get("/api/v1/faqs?q=&category=").await).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn blog_listing_omits_bodies() {
    let body = json_body(get("/api/v1/blog?category=Recycling").await).await;
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 2);
    assert!(items[0].get("body").is_none());
    assert_eq!(items[1]["published_on"], "2025-03-14");
}

#[tokio::test]
async fn blog_categories_are_derived() {
    let body = json_body(get("/api/v1/blog/categories").await).await;
    assert_eq!(body, serde_json::json!(["Lifestyle", "Recycling"]));
}

#[tokio::test]
async fn post_route_includes_related_posts() {
    let response = get("/api/v1/blog/hoarding-help").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["post"]["title"], "Hoarding");
    assert_eq!(body["related_source"], "latest");
    assert_eq!(body["related"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn unknown_post_returns_not_found() {
    let response = get("/api/v1/blog/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "post `nope` not found");
}

#[tokio::test]
async fn location_routes_search_and_resolve() {
    let body = json_body(get("/api/v1/locations?category=South").await).await;
    assert_eq!(body[0]["slug"], "salem");

    let response = get("/api/v1/locations/portland").await;
    assert_eq!(response.status(), StatusCode::OK);

    let missing = get("/api/v1/locations/boise").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_tables_are_served_in_display_order() {
    let steps = json_body(get("/api/v1/process-steps").await).await;
    assert_eq!(steps[0]["id"], "book");

    let pricing = json_body(get("/api/v1/pricing").await).await;
    assert_eq!(pricing[0]["price_cents"], 12900);

    let testimonials = json_body(get("/api/v1/testimonials").await).await;
    assert_eq!(testimonials[0]["rating"], 5);

    let navigation = json_body(get("/api/v1/navigation").await).await;
    assert_eq!(navigation[0]["label"], "Services");
    assert_eq!(navigation[0]["children"][0]["id"], "furniture");
}
