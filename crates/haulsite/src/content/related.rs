use std::collections::HashSet;

use super::domain::BlogPost;

/// Which fallback tier produced a related-post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedSource {
    Curated,
    SameCategory,
    Latest,
    None,
}

/// Related posts for `post`, cascading through three tiers.
///
/// 1. The post's curated `related_slugs`, in declared order, each slug once.
/// 2. Posts sharing the post's category, when no curated slug resolved.
/// 3. The first posts of `all`, when the category tier is empty too.
///
/// A lower tier is consulted only when every higher tier came back empty. The post
/// itself never appears, and at most `limit` posts are returned.
pub fn related_posts<'a>(
    post: &BlogPost,
    all: &'a [BlogPost],
    limit: usize,
) -> (RelatedSource, Vec<&'a BlogPost>) {
    if limit == 0 {
        return (RelatedSource::None, Vec::new());
    }

    let others = || all.iter().filter(move |candidate| candidate.slug != post.slug);

    let mut listed = HashSet::new();
    let curated: Vec<&BlogPost> = post
        .related_slugs
        .iter()
        .filter(|slug| slug.as_str() != post.slug.as_str())
        .filter(|slug| listed.insert(slug.as_str()))
        .filter_map(|slug| all.iter().find(|candidate| candidate.slug.as_str() == slug.as_str()))
        .take(limit)
        .collect();
    if !curated.is_empty() {
        return (RelatedSource::Curated, curated);
    }

    if let Some(category) = post.category.as_deref() {
        let same_category: Vec<&BlogPost> = others()
            .filter(|candidate| candidate.category.as_deref() == Some(category))
            .take(limit)
            .collect();
        if !same_category.is_empty() {
            return (RelatedSource::SameCategory, same_category);
        }
    }

    let latest: Vec<&BlogPost> = others().take(limit).collect();
    if latest.is_empty() {
        (RelatedSource::None, latest)
    } else {
        (RelatedSource::Latest, latest)
    }
}
