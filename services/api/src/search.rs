use crate::infra::load_catalog;
use clap::{Args, ValueEnum};
use haulsite::config::AppConfig;
use haulsite::content::{derive_categories, ContentCatalog, Query};
use haulsite::error::AppError;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SearchKind {
    Faqs,
    Posts,
    Locations,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Record kind to search
    #[arg(value_enum)]
    pub(crate) kind: SearchKind,
    /// Case-insensitive text to look for
    #[arg(long, short)]
    pub(crate) query: Option<String>,
    /// Exact category (region, for locations)
    #[arg(long, short)]
    pub(crate) category: Option<String>,
    /// Content document to read instead of CONTENT_PATH
    #[arg(long)]
    pub(crate) content: Option<PathBuf>,
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        kind,
        query,
        category,
        content,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(path) = content {
        config.content.content_path = Some(path);
    }
    let catalog = load_catalog(&config.content).await;

    let mut query = Query::text(query.unwrap_or_default());
    if let Some(category) = category {
        query = query.with_category(category);
    }

    for line in render(&catalog, kind, &query) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render(catalog: &ContentCatalog, kind: SearchKind, query: &Query) -> Vec<String> {
    let (categories, mut lines) = match kind {
        SearchKind::Faqs => (
            derive_categories(&catalog.faqs),
            catalog
                .search_faqs(query)
                .into_iter()
                .map(|faq| format!("- {} ({})", faq.question, label(faq.category.as_deref())))
                .collect::<Vec<_>>(),
        ),
        SearchKind::Posts => (
            derive_categories(&catalog.blog_posts),
            catalog
                .search_posts(query)
                .into_iter()
                .map(|post| {
                    format!(
                        "- {} [{}] ({})",
                        post.title,
                        post.slug,
                        label(post.category.as_deref())
                    )
                })
                .collect(),
        ),
        SearchKind::Locations => (
            derive_categories(&catalog.locations),
            catalog
                .search_locations(query)
                .into_iter()
                .map(|location| {
                    format!(
                        "- {}, {} ({})",
                        location.city,
                        location.state,
                        label(location.region.as_deref())
                    )
                })
                .collect(),
        ),
    };

    let count = lines.len();
    let categories = categories.into_iter().collect::<Vec<_>>().join(", ");
    lines.insert(0, format!("{count} match(es); categories: {categories}"));
    lines
}

fn label(category: Option<&str>) -> &str {
    category.unwrap_or("uncategorized")
}
