use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query as QueryParams, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::catalog::ContentCatalog;
use super::domain::{
    BlogPost, BlogPostSummary, Faq, Location, NavItem, PricingTier, ProcessStep, Testimonial,
};
use super::filter::{derive_categories, Query};
use super::related::RelatedSource;

/// Read-only routes over the loaded content catalog.
pub fn content_router(catalog: Arc<ContentCatalog>) -> Router {
    Router::new()
        .route("/api/v1/faqs", get(faqs_handler))
        .route("/api/v1/faqs/categories", get(faq_categories_handler))
        .route("/api/v1/blog", get(posts_handler))
        .route("/api/v1/blog/categories", get(post_categories_handler))
        .route("/api/v1/blog/:slug", get(post_handler))
        .route("/api/v1/locations", get(locations_handler))
        .route("/api/v1/locations/:slug", get(location_handler))
        .route("/api/v1/pricing", get(pricing_handler))
        .route("/api/v1/testimonials", get(testimonials_handler))
        .route("/api/v1/process-steps", get(process_steps_handler))
        .route("/api/v1/navigation", get(navigation_handler))
        .with_state(catalog)
}

#[derive(Debug, Serialize)]
pub struct BlogPostView {
    pub post: BlogPost,
    pub related_source: RelatedSource,
    pub related: Vec<BlogPostSummary>,
}

#[derive(Debug, Serialize)]
pub struct NavSection {
    #[serde(flatten)]
    pub item: NavItem,
    pub children: Vec<NavItem>,
}

fn not_found(kind: &str, slug: &str) -> Response {
    let payload = json!({
        "error": format!("{kind} `{slug}` not found"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

pub(crate) async fn faqs_handler(
    State(catalog): State<Arc<ContentCatalog>>,
    QueryParams(query): QueryParams<Query>,
) -> Json<Vec<Faq>> {
    Json(catalog.search_faqs(&query).into_iter().cloned().collect())
}

pub(crate) async fn faq_categories_handler(
    State(catalog): State<Arc<ContentCatalog>>,
) -> Json<BTreeSet<String>> {
    Json(derive_categories(&catalog.faqs))
}

pub(crate) async fn posts_handler(
    State(catalog): State<Arc<ContentCatalog>>,
    QueryParams(query): QueryParams<Query>,
) -> Json<Vec<BlogPostSummary>> {
    Json(
        catalog
            .search_posts(&query)
            .into_iter()
            .map(BlogPost::summary)
            .collect(),
    )
}

pub(crate) async fn post_categories_handler(
    State(catalog): State<Arc<ContentCatalog>>,
) -> Json<BTreeSet<String>> {
    Json(derive_categories(&catalog.blog_posts))
}

pub(crate) async fn post_handler(
    State(catalog): State<Arc<ContentCatalog>>,
    Path(slug): Path<String>,
) -> Response {
    let Some(post) = catalog.post(&slug) else {
        return not_found("post", &slug);
    };
    let (related_source, related) = catalog.related_to(post);
    let view = BlogPostView {
        post: post.clone(),
        related_source,
        related: related.into_iter().map(BlogPost::summary).collect(),
    };
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn locations_handler(
    State(catalog): State<Arc<ContentCatalog>>,
    QueryParams(query): QueryParams<Query>,
) -> Json<Vec<Location>> {
    Json(catalog.search_locations(&query).into_iter().cloned().collect())
}

pub(crate) async fn location_handler(
    State(catalog): State<Arc<ContentCatalog>>,
    Path(slug): Path<String>,
) -> Response {
    match catalog.location(&slug) {
        Some(location) => (StatusCode::OK, Json(location.clone())).into_response(),
        None => not_found("location", &slug),
    }
}

pub(crate) async fn pricing_handler(
    State(catalog): State<Arc<ContentCatalog>>,
) -> Json<Vec<PricingTier>> {
    Json(catalog.pricing_tiers.clone())
}

pub(crate) async fn testimonials_handler(
    State(catalog): State<Arc<ContentCatalog>>,
) -> Json<Vec<Testimonial>> {
    Json(catalog.testimonials.clone())
}

pub(crate) async fn process_steps_handler(
    State(catalog): State<Arc<ContentCatalog>>,
) -> Json<Vec<ProcessStep>> {
    Json(catalog.process_steps.clone())
}

pub(crate) async fn navigation_handler(
    State(catalog): State<Arc<ContentCatalog>>,
) -> Json<Vec<NavSection>> {
    Json(
        catalog
            .navigation_tree()
            .into_iter()
            .map(|(item, children)| NavSection {
                item: item.clone(),
                children: children.into_iter().cloned().collect(),
            })
            .collect(),
    )
}
