use serde_json::{json, Value};

use crate::content::domain::{BlogPost, ContentTable, Faq, Location, RecordKey};
use crate::content::source::StaticSource;

pub(super) fn faq(id: &str, question: &str, category: Option<&str>) -> Faq {
    Faq {
        id: RecordKey::from(id),
        question: question.to_string(),
        answer: format!("Answer to: {question}"),
        category: category.map(str::to_string),
        sort_order: 0,
    }
}

pub(super) fn post(slug: &str, title: &str, category: Option<&str>) -> BlogPost {
    BlogPost {
        slug: RecordKey::from(slug),
        title: title.to_string(),
        excerpt: format!("A short look at {}", title.to_lowercase()),
        body: String::new(),
        category: category.map(str::to_string),
        tags: Vec::new(),
        published_on: None,
        author: None,
        related_slugs: Vec::new(),
    }
}

pub(super) fn location(slug: &str, city: &str, region: Option<&str>) -> Location {
    Location {
        slug: RecordKey::from(slug),
        city: city.to_string(),
        state: "OR".to_string(),
        region: region.map(str::to_string),
        summary: format!("Same-day junk removal in {city}"),
        service_areas: vec![format!("{city} Metro")],
        phone: None,
    }
}

pub(super) fn junk_posts() -> Vec<BlogPost> {
    vec![
        post("electronics-recycling", "Electronics", Some("Recycling")),
        post("hoarding-help", "Hoarding", Some("Lifestyle")),
        post("mattress-disposal", "Mattress Disposal", Some("Recycling")),
        post("garage-cleanout", "Garage Cleanout Checklist", Some("Guides")),
        post("moving-day", "Moving Day Decluttering", None),
    ]
}

pub(super) fn faqs() -> Vec<Faq> {
    vec![
        faq("faq-1", "What items do you take?", Some("Services")),
        faq("faq-2", "Do you recycle electronics?", Some("Recycling")),
        faq("faq-3", "How is pricing calculated?", Some("Pricing")),
        faq("faq-4", "Can I get a same-day pickup?", Some("Services")),
        faq("faq-5", "Are you insured?", None),
    ]
}

pub(super) fn content_source() -> StaticSource {
    StaticSource::new()
        .with_table(
            ContentTable::Faqs,
            vec![
                json!({"id": "faq-2", "question": "Do you recycle?", "answer": "Yes.", "category": "Recycling", "sort_order": 2}),
                json!({"id": "faq-1", "question": "What do you take?", "answer": "Almost everything.", "category": "Services", "sort_order": 1}),
            ],
        )
        .with_table(ContentTable::BlogPosts, blog_rows())
        .with_table(
            ContentTable::Locations,
            vec![
                json!({"slug": "portland", "city": "Portland", "state": "OR", "region": "North", "summary": "Serving the metro.", "service_areas": ["Beaverton", "Gresham"]}),
                json!({"slug": "salem", "city": "Salem", "state": "OR", "region": "South"}),
            ],
        )
        .with_table(
            ContentTable::PricingTiers,
            vec![
                json!({"id": "full", "name": "Full Truck", "load_size": "full", "price_cents": 59900, "sort_order": 3}),
                json!({"id": "min", "name": "Minimum", "load_size": "1/8", "price_cents": 12900, "sort_order": 1, "popular": false}),
            ],
        )
        .with_table(
            ContentTable::Testimonials,
            vec![json!({"id": "t-1", "author": "Dana", "quote": "Fast and friendly.", "rating": 5})],
        )
        .with_table(
            ContentTable::ProcessSteps,
            vec![
                json!({"id": "haul", "position": 3, "title": "We haul it away"}),
                json!({"id": "book", "position": 1, "title": "Book online"}),
                json!({"id": "quote", "position": 2, "title": "Get an on-site quote"}),
            ],
        )
        .with_table(
            ContentTable::Navigation,
            vec![
                json!({"id": "services", "label": "Services", "href": "/services", "position": 1}),
                json!({"id": "furniture", "label": "Furniture Removal", "href": "/services/furniture", "position": 2, "parent_id": "services"}),
                json!({"id": "blog", "label": "Blog", "href": "/blog", "position": 3}),
            ],
        )
}

fn blog_rows() -> Vec<Value> {
    vec![
        json!({"slug": "electronics-recycling", "title": "Electronics", "excerpt": "Where old TVs go.", "category": "Recycling", "tags": ["e-waste"], "related_slugs": ["mattress-disposal"]}),
        json!({"slug": "hoarding-help", "title": "Hoarding", "excerpt": "Compassionate cleanouts.", "category": "Lifestyle"}),
        json!({"slug": "mattress-disposal", "title": "Mattress Disposal", "excerpt": "Beds, frames and box springs.", "category": "Recycling", "published_on": "2025-03-14"}),
    ]
}
