use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier of a content record, unique within its table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(pub String);

impl RecordKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Content tables exposed by the hosted data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTable {
    Faqs,
    BlogPosts,
    Locations,
    PricingTiers,
    Testimonials,
    ProcessSteps,
    Navigation,
}

impl ContentTable {
    pub const ALL: [ContentTable; 7] = [
        ContentTable::Faqs,
        ContentTable::BlogPosts,
        ContentTable::Locations,
        ContentTable::PricingTiers,
        ContentTable::Testimonials,
        ContentTable::ProcessSteps,
        ContentTable::Navigation,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ContentTable::Faqs => "faqs",
            ContentTable::BlogPosts => "blog_posts",
            ContentTable::Locations => "locations",
            ContentTable::PricingTiers => "pricing_tiers",
            ContentTable::Testimonials => "testimonials",
            ContentTable::ProcessSteps => "process_steps",
            ContentTable::Navigation => "navigation",
        }
    }
}

impl fmt::Display for ContentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records the filter engine can narrow by free text and category.
pub trait Searchable {
    fn key(&self) -> &RecordKey;
    fn category(&self) -> Option<&str>;
    /// Title, body, category and tags, in that order.
    fn searchable_fields(&self) -> Vec<&str>;
}

/// Records materialized from a content table at the fetch boundary.
pub trait ContentRecord: serde::de::DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: ContentTable;

    fn record_key(&self) -> &RecordKey;

    /// Rejects rows that deserialized but still break the record's invariants.
    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("key", self.record_key().as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` {problem}")]
pub struct RecordInvalid {
    pub field: &'static str,
    pub problem: String,
}

fn require_text(field: &'static str, value: &str) -> Result<(), RecordInvalid> {
    if value.trim().is_empty() {
        Err(RecordInvalid {
            field,
            problem: "must not be blank".to_string(),
        })
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: RecordKey,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Display position; rows without one sort first.
    #[serde(default)]
    pub sort_order: i32,
}

impl Searchable for Faq {
    fn key(&self) -> &RecordKey {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.question.as_str(), self.answer.as_str()];
        fields.extend(self.category.as_deref());
        fields
    }
}

impl ContentRecord for Faq {
    const TABLE: ContentTable = ContentTable::Faqs;

    fn record_key(&self) -> &RecordKey {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("id", self.id.as_str())?;
        require_text("question", &self.question)?;
        require_text("answer", &self.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: RecordKey,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_on: Option<NaiveDate>,
    #[serde(default)]
    pub author: Option<String>,
    /// Editor-curated related posts, consulted before any category fallback.
    #[serde(default)]
    pub related_slugs: Vec<String>,
}

impl BlogPost {
    pub fn summary(&self) -> BlogPostSummary {
        BlogPostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            published_on: self.published_on,
        }
    }
}

impl Searchable for BlogPost {
    fn key(&self) -> &RecordKey {
        &self.slug
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.category.as_deref());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl ContentRecord for BlogPost {
    const TABLE: ContentTable = ContentTable::BlogPosts;

    fn record_key(&self) -> &RecordKey {
        &self.slug
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("slug", self.slug.as_str())?;
        require_text("title", &self.title)
    }
}

/// Listing view of a post without its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPostSummary {
    pub slug: RecordKey,
    pub title: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub slug: RecordKey,
    pub city: String,
    pub state: String,
    /// Acts as the location's category.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Searchable for Location {
    fn key(&self) -> &RecordKey {
        &self.slug
    }

    fn category(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.city.as_str(), self.summary.as_str()];
        fields.extend(self.region.as_deref());
        fields.push(self.state.as_str());
        fields.extend(self.service_areas.iter().map(String::as_str));
        fields
    }
}

impl ContentRecord for Location {
    const TABLE: ContentTable = ContentTable::Locations;

    fn record_key(&self) -> &RecordKey {
        &self.slug
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("slug", self.slug.as_str())?;
        require_text("city", &self.city)?;
        require_text("state", &self.state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub id: RecordKey,
    pub name: String,
    /// Truck share covered by the tier, e.g. "1/4 load".
    #[serde(default)]
    pub load_size: String,
    pub price_cents: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl ContentRecord for PricingTier {
    const TABLE: ContentTable = ContentTable::PricingTiers;

    fn record_key(&self) -> &RecordKey {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("id", self.id.as_str())?;
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: RecordKey,
    pub author: String,
    pub quote: String,
    pub rating: u8,
    #[serde(default)]
    pub city: Option<String>,
}

impl ContentRecord for Testimonial {
    const TABLE: ContentTable = ContentTable::Testimonials;

    fn record_key(&self) -> &RecordKey {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("id", self.id.as_str())?;
        require_text("quote", &self.quote)?;
        if !(1..=5).contains(&self.rating) {
            return Err(RecordInvalid {
                field: "rating",
                problem: format!("must be between 1 and 5, got {}", self.rating),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub id: RecordKey,
    pub position: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ContentRecord for ProcessStep {
    const TABLE: ContentTable = ContentTable::ProcessSteps;

    fn record_key(&self) -> &RecordKey {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("id", self.id.as_str())?;
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: RecordKey,
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub parent_id: Option<RecordKey>,
}

impl ContentRecord for NavItem {
    const TABLE: ContentTable = ContentTable::Navigation;

    fn record_key(&self) -> &RecordKey {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordInvalid> {
        require_text("id", self.id.as_str())?;
        require_text("label", &self.label)?;
        if !(self.href.starts_with('/') || self.href.starts_with("http")) {
            return Err(RecordInvalid {
                field: "href",
                problem: format!("must be a site path or absolute URL, got `{}`", self.href),
            });
        }
        Ok(())
    }
}
