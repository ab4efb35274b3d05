use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::forms::{CareerDraft, QuoteDraft};

/// Identifier assigned to a persisted submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Quote,
    Career,
}

impl SubmissionKind {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionKind::Quote => "quote",
            SubmissionKind::Career => "career",
        }
    }
}

/// A completed form, ready to persist as a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "form", rename_all = "snake_case")]
pub enum Submission {
    Quote(QuoteDraft),
    Career(CareerDraft),
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Quote(_) => SubmissionKind::Quote,
            Submission::Career(_) => SubmissionKind::Career,
        }
    }

    pub fn contact_email(&self) -> &str {
        match self {
            Submission::Quote(draft) => &draft.email,
            Submission::Career(draft) => &draft.email,
        }
    }
}

/// Envelope handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub submission: Submission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            id: self.id.clone(),
            kind: self.submission.kind(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Persist-form boundary. A call either stores the whole record or nothing.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn persist(&self, record: SubmissionRecord) -> Result<(), SubmissionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission already exists")]
    Conflict,
    #[error("submission store unavailable: {0}")]
    Unavailable(String),
}
