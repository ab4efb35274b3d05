use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::intake::analytics::{AnalyticsContext, MemoryAnalytics};
use crate::intake::forms::{Availability, CareerDraft, LoadSize, QuoteDraft};
use crate::intake::notices::NoticeBus;
use crate::intake::service::IntakeService;
use crate::intake::submission::{SubmissionError, SubmissionRecord, SubmissionSink};
use crate::intake::upload::{Locator, UploadError, UploadSink};

pub(super) const MAX_UPLOAD: usize = 1024;

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    records: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl MemorySink {
    pub(super) fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn persist(&self, record: SubmissionRecord) -> Result<(), SubmissionError> {
        self.records.lock().expect("lock").push(record);
        Ok(())
    }
}

pub(super) struct OfflineSink;

#[async_trait]
impl SubmissionSink for OfflineSink {
    async fn persist(&self, _record: SubmissionRecord) -> Result<(), SubmissionError> {
        Err(SubmissionError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryUploads {
    objects: Arc<Mutex<BTreeMap<String, (Vec<u8>, String)>>>,
}

impl MemoryUploads {
    pub(super) fn objects(&self) -> BTreeMap<String, (Vec<u8>, String)> {
        self.objects.lock().expect("lock").clone()
    }
}

#[async_trait]
impl UploadSink for MemoryUploads {
    async fn store(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<Locator, UploadError> {
        self.objects
            .lock()
            .expect("lock")
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(Locator(format!("https://files.test/{path}")))
    }
}

/// Fails any object whose path contains `poison`, stores the rest.
#[derive(Default, Clone)]
pub(super) struct FlakyUploads {
    pub(super) poison: String,
    inner: MemoryUploads,
}

impl FlakyUploads {
    pub(super) fn failing_on(poison: &str) -> Self {
        Self {
            poison: poison.to_string(),
            inner: MemoryUploads::default(),
        }
    }
}

#[async_trait]
impl UploadSink for FlakyUploads {
    async fn store(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<Locator, UploadError> {
        if path.contains(&self.poison) {
            return Err(UploadError::Storage("connection reset".to_string()));
        }
        self.inner.store(path, bytes, content_type).await
    }
}

pub(super) struct OfflineUploads;

#[async_trait]
impl UploadSink for OfflineUploads {
    async fn store(
        &self,
        _path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<Locator, UploadError> {
        Err(UploadError::Storage("bucket unreachable".to_string()))
    }
}

pub(super) fn quote_draft() -> QuoteDraft {
    QuoteDraft {
        items_description: "Old sectional sofa and two mattresses".to_string(),
        load_size: Some(LoadSize::Quarter),
        address: "1200 SE Main St".to_string(),
        zip: "97214".to_string(),
        preferred_date: NaiveDate::from_ymd_opt(2025, 6, 2),
        photos: vec![Locator("https://files.test/quotes/sofa.jpg".to_string())],
        name: "Jordan Price".to_string(),
        phone: "(503) 555-0142".to_string(),
        email: "jordan@example.com".to_string(),
        notes: None,
    }
}

pub(super) fn career_draft() -> CareerDraft {
    CareerDraft {
        position: "Crew Member".to_string(),
        availability: Some(Availability::FullTime),
        has_drivers_license: true,
        years_experience: 2,
        experience_summary: "Two years on a moving crew.".to_string(),
        name: "Sam Ortiz".to_string(),
        phone: "503-555-0199".to_string(),
        email: "sam@example.com".to_string(),
        resume: Some(Locator(
            "https://files.test/applications/2025/resume.pdf".to_string(),
        )),
    }
}

pub(super) struct Harness<S, U> {
    pub(super) service: Arc<IntakeService<S, U>>,
    pub(super) sink: Arc<S>,
    pub(super) uploads: Arc<U>,
    pub(super) notices: NoticeBus,
    pub(super) analytics: MemoryAnalytics,
}

pub(super) fn harness<S, U>(sink: S, uploads: U) -> Harness<S, U>
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    let sink = Arc::new(sink);
    let uploads = Arc::new(uploads);
    let notices = NoticeBus::default();
    let analytics = MemoryAnalytics::default();
    let service = Arc::new(IntakeService::new(
        Arc::clone(&sink),
        Arc::clone(&uploads),
        notices.clone(),
        AnalyticsContext::new(Arc::new(analytics.clone())),
        MAX_UPLOAD,
    ));
    Harness {
        service,
        sink,
        uploads,
        notices,
        analytics,
    }
}
