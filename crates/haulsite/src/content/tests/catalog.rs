use std::io::Write;

use serde_json::json;

use super::common::*;
use crate::content::catalog::ContentCatalog;
use crate::content::domain::{BlogPost, ContentTable, Faq, Testimonial};
use crate::content::filter::Query;
use crate::content::related::RelatedSource;
use crate::content::source::{load_records, JsonFileSource, StaticSource, UnavailableSource};

#[tokio::test]
async fn failed_fetch_degrades_to_empty_list() {
    let source = UnavailableSource("connection refused".to_string());
    let faqs: Vec<Faq> = load_records(&source).await;
    assert!(faqs.is_empty());

    let catalog = ContentCatalog::load(&source, 3).await;
    assert!(catalog.blog_posts.is_empty());
    assert!(catalog.navigation.is_empty());
}

#[tokio::test]
async fn malformed_invalid_and_duplicate_rows_are_dropped() {
    let source = StaticSource::new().with_table(
        ContentTable::Testimonials,
        vec![
            json!({"id": "t-1", "author": "Ana", "quote": "Spotless.", "rating": 5}),
            json!({"id": "t-2", "author": "Bo", "quote": "Great.", "rating": 9}),
            json!({"id": "t-3", "author": "Cy"}),
            json!({"id": "t-1", "author": "Dee", "quote": "Again?", "rating": 4}),
            json!({"id": "t-4", "author": "Eli", "quote": "On time.", "rating": 4}),
        ],
    );

    let testimonials: Vec<Testimonial> = load_records(&source).await;

    let ids: Vec<&str> = testimonials.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t-1", "t-4"]);
    assert_eq!(testimonials[0].author, "Ana");
}

#[tokio::test]
async fn optional_fields_take_documented_defaults() {
    let source = StaticSource::new().with_table(
        ContentTable::BlogPosts,
        vec![json!({"slug": "bare", "title": "Bare Post"})],
    );

    let posts: Vec<BlogPost> = load_records(&source).await;

    assert_eq!(posts.len(), 1);
    assert!(posts[0].tags.is_empty());
    assert!(posts[0].related_slugs.is_empty());
    assert_eq!(posts[0].category, None);
    assert_eq!(posts[0].excerpt, "");
}

#[tokio::test]
async fn catalog_sorts_positioned_tables() {
    let catalog = ContentCatalog::load(&content_source(), 3).await;

    let faq_ids: Vec<&str> = catalog.faqs.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(faq_ids, vec!["faq-1", "faq-2"]);

    let steps: Vec<&str> = catalog
        .process_steps
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(steps, vec!["book", "quote", "haul"]);

    let tiers: Vec<&str> = catalog
        .pricing_tiers
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(tiers, vec!["min", "full"]);
}

#[tokio::test]
async fn catalog_resolves_posts_and_related_content() {
    let catalog = ContentCatalog::load(&content_source(), 3).await;

    let post = catalog
        .post("electronics-recycling")
        .expect("post exists");
    let (source, related) = catalog.related_to(post);
    assert_eq!(source, RelatedSource::Curated);
    assert_eq!(related[0].slug.as_str(), "mattress-disposal");

    assert!(catalog.post("missing").is_none());
    assert_eq!(catalog.search_posts(&Query::text("elect")).len(), 1);
    assert_eq!(
        catalog
            .search_locations(&Query::text("gresham"))
            .first()
            .map(|l| l.city.as_str()),
        Some("Portland")
    );
}

#[tokio::test]
async fn navigation_tree_nests_children() {
    let catalog = ContentCatalog::load(&content_source(), 3).await;
    let tree = catalog.navigation_tree();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].0.label, "Services");
    assert_eq!(tree[0].1.len(), 1);
    assert_eq!(tree[0].1[0].href, "/services/furniture");
    assert!(tree[1].1.is_empty());
}

#[tokio::test]
async fn json_file_source_reads_tables_by_name() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let document = json!({
        "faqs": [{"id": "f", "question": "Do you take paint?", "answer": "Latex only."}],
        "locations": null,
        "navigation": {"not": "a list"}
    });
    file.write_all(document.to_string().as_bytes())
        .expect("write document");

    let source = JsonFileSource::new(file.path());
    let catalog = ContentCatalog::load(&source, 3).await;

    assert_eq!(catalog.faqs.len(), 1);
    assert!(catalog.locations.is_empty());
    assert!(catalog.navigation.is_empty());
    assert!(catalog.blog_posts.is_empty());
}

#[tokio::test]
async fn missing_document_degrades_to_empty_catalog() {
    let source = JsonFileSource::new("/definitely/not/here/content.json");
    let catalog = ContentCatalog::load(&source, 3).await;
    assert!(catalog.faqs.is_empty());
    assert_eq!(catalog.related_limit(), 3);
}
