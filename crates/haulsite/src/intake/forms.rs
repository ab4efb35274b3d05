use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::upload::Locator;
use super::wizard::FormStep;

/// Truck share a customer expects to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSize {
    SingleItem,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

/// Draft of the three-step quote request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDraft {
    #[serde(default)]
    pub items_description: String,
    #[serde(default)]
    pub load_size: Option<LoadSize>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    pub photos: Vec<Locator>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn quote_steps() -> Vec<FormStep> {
    vec![
        FormStep::new("Items", "What needs to go and roughly how much of it"),
        FormStep::new("Details", "Pickup address, preferred date and photos"),
        FormStep::new("Contact", "How we reach you with the quote"),
    ]
}

impl QuoteDraft {
    /// Whether the required fields of step `index` are filled in.
    pub fn step_ready(&self, index: usize) -> bool {
        match index {
            0 => is_present(&self.items_description) && self.load_size.is_some(),
            1 => is_present(&self.address) && is_valid_zip(&self.zip),
            2 => {
                is_present(&self.name)
                    && is_valid_phone(&self.phone)
                    && is_valid_email(&self.email)
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    FullTime,
    PartTime,
    Weekends,
}

/// Draft of the three-step careers application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerDraft {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub has_drivers_license: bool,
    #[serde(default)]
    pub years_experience: u8,
    #[serde(default)]
    pub experience_summary: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub resume: Option<Locator>,
}

pub fn career_steps() -> Vec<FormStep> {
    vec![
        FormStep::new("Position", "Role and availability"),
        FormStep::new("Experience", "Relevant work history"),
        FormStep::new("Contact & Resume", "Contact details and resume upload"),
    ]
}

impl CareerDraft {
    pub fn step_ready(&self, index: usize) -> bool {
        match index {
            0 => is_present(&self.position) && self.availability.is_some(),
            1 => is_present(&self.experience_summary),
            2 => {
                is_present(&self.name)
                    && is_valid_phone(&self.phone)
                    && is_valid_email(&self.email)
                    && self.resume.is_some()
            }
            _ => false,
        }
    }
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Requires a local part, an `@`, and a dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// At least ten digits once punctuation and spaces are ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let only_phone_chars = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.' | '+'));
    digits >= 10 && only_phone_chars
}

pub fn is_valid_zip(value: &str) -> bool {
    let value = value.trim();
    let (base, extension) = match value.split_once('-') {
        Some((base, extension)) => (base, Some(extension)),
        None => (value, None),
    };
    let all_digits =
        |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(base, 5) && extension.map_or(true, |ext| all_digits(ext, 4))
}
