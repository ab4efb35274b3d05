//! Free-text and category narrowing over in-memory record lists.
//!
//! Everything here is pure: the source slice is never mutated and results keep the
//! source's relative order. There is no ranking.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::domain::Searchable;

/// Free text plus an optional exact category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Query {
    #[serde(default, rename = "q")]
    pub text: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
}

impl Query {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when the query selects every record.
    pub fn is_identity(&self) -> bool {
        self.text.trim().is_empty() && self.category.is_none()
    }

    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        self.category_matches(record) && self.text_matches(record)
    }

    fn category_matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        match self.category.as_deref() {
            Some(wanted) => record.category() == Some(wanted),
            None => true,
        }
    }

    fn text_matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        let needle = self.text.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        record
            .searchable_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

// `?category=` arrives as an empty string from HTML forms.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

/// Returns the records matching `query`, in their original order.
pub fn filter<'a, T: Searchable>(records: &'a [T], query: &Query) -> Vec<&'a T> {
    records.iter().filter(|record| query.matches(*record)).collect()
}

pub fn filter_owned<T: Searchable + Clone>(records: &[T], query: &Query) -> Vec<T> {
    filter(records, query).into_iter().cloned().collect()
}

/// Distinct, non-empty categories present in `records`.
pub fn derive_categories<'a, T, I>(records: I) -> BTreeSet<String>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter_map(|record| record.category())
        .filter(|category| !category.trim().is_empty())
        .map(str::to_string)
        .collect()
}
