use tracing::info;

use super::domain::{BlogPost, Faq, Location, NavItem, PricingTier, ProcessStep, Testimonial};
use super::filter::{filter, Query};
use super::related::{related_posts, RelatedSource};
use super::source::{load_records, RecordSource};

/// Snapshot of every content table, loaded once and held for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    pub faqs: Vec<Faq>,
    pub blog_posts: Vec<BlogPost>,
    pub locations: Vec<Location>,
    pub pricing_tiers: Vec<PricingTier>,
    pub testimonials: Vec<Testimonial>,
    pub process_steps: Vec<ProcessStep>,
    pub navigation: Vec<NavItem>,
    related_limit: usize,
}

impl ContentCatalog {
    pub async fn load<S>(source: &S, related_limit: usize) -> Self
    where
        S: RecordSource + ?Sized,
    {
        let (faqs, blog_posts, locations, pricing_tiers, testimonials, process_steps, navigation) =
            tokio::join!(
                load_records::<Faq, _>(source),
                load_records::<BlogPost, _>(source),
                load_records::<Location, _>(source),
                load_records::<PricingTier, _>(source),
                load_records::<Testimonial, _>(source),
                load_records::<ProcessStep, _>(source),
                load_records::<NavItem, _>(source),
            );

        let mut catalog = Self {
            faqs,
            blog_posts,
            locations,
            pricing_tiers,
            testimonials,
            process_steps,
            navigation,
            related_limit,
        };
        catalog.sort();

        info!(
            faqs = catalog.faqs.len(),
            blog_posts = catalog.blog_posts.len(),
            locations = catalog.locations.len(),
            pricing_tiers = catalog.pricing_tiers.len(),
            "content catalog loaded"
        );
        catalog
    }

    // Stable sorts keep source order among equal positions.
    fn sort(&mut self) {
        self.faqs.sort_by_key(|faq| faq.sort_order);
        self.pricing_tiers.sort_by_key(|tier| tier.sort_order);
        self.process_steps.sort_by_key(|step| step.position);
        self.navigation.sort_by_key(|item| item.position);
    }

    pub fn related_limit(&self) -> usize {
        self.related_limit
    }

    pub fn search_faqs(&self, query: &Query) -> Vec<&Faq> {
        filter(&self.faqs, query)
    }

    pub fn search_posts(&self, query: &Query) -> Vec<&BlogPost> {
        filter(&self.blog_posts, query)
    }

    pub fn search_locations(&self, query: &Query) -> Vec<&Location> {
        filter(&self.locations, query)
    }

    pub fn post(&self, slug: &str) -> Option<&BlogPost> {
        self.blog_posts.iter().find(|post| post.slug.as_str() == slug)
    }

    pub fn location(&self, slug: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|location| location.slug.as_str() == slug)
    }

    pub fn related_to(&self, post: &BlogPost) -> (RelatedSource, Vec<&BlogPost>) {
        related_posts(post, &self.blog_posts, self.related_limit)
    }

    /// Top-level navigation entries paired with their children.
    pub fn navigation_tree(&self) -> Vec<(&NavItem, Vec<&NavItem>)> {
        self.navigation
            .iter()
            .filter(|item| item.parent_id.is_none())
            .map(|parent| {
                let children = self
                    .navigation
                    .iter()
                    .filter(|child| child.parent_id.as_ref() == Some(&parent.id))
                    .collect();
                (parent, children)
            })
            .collect()
    }
}
