//! Site content: typed record kinds, the fetch boundary, search/filter and related posts.

pub mod catalog;
pub mod domain;
pub mod filter;
pub mod related;
pub mod router;
pub mod source;

#[cfg(test)]
mod tests;

pub use catalog::ContentCatalog;
pub use domain::{
    BlogPost, BlogPostSummary, ContentRecord, ContentTable, Faq, Location, NavItem, PricingTier,
    ProcessStep, RecordInvalid, RecordKey, Searchable, Testimonial,
};
pub use filter::{derive_categories, filter, filter_owned, Query};
pub use related::{related_posts, RelatedSource};
pub use router::content_router;
pub use source::{
    load_records, JsonFileSource, RecordSource, SourceError, StaticSource, UnavailableSource,
};
