use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use haulsite::intake::{
    quote_steps, AnalyticsContext, DiskUploadSink, IntakeService, LoadSize, MemoryAnalytics,
    NoticeBus, NoticeLevel, QuoteDraft, StepForm, Submission, SubmissionError, SubmissionKind,
    SubmissionRecord, SubmissionSink, Transition, UploadFile, WizardState,
};

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<SubmissionRecord>>,
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn persist(&self, record: SubmissionRecord) -> Result<(), SubmissionError> {
        self.records.lock().expect("sink mutex").push(record);
        Ok(())
    }
}

fn service(
    upload_root: &std::path::Path,
) -> (
    IntakeService<RecordingSink, DiskUploadSink>,
    Arc<RecordingSink>,
    NoticeBus,
) {
    let sink = Arc::new(RecordingSink::default());
    let notices = NoticeBus::default();
    let service = IntakeService::new(
        Arc::clone(&sink),
        Arc::new(DiskUploadSink::new(upload_root, "https://cdn.example.com/uploads/")),
        notices.clone(),
        AnalyticsContext::new(Arc::new(MemoryAnalytics::default())),
        4096,
    );
    (service, sink, notices)
}

#[tokio::test]
async fn customer_walks_quote_wizard_with_photos() {
    let upload_root = tempfile::tempdir().expect("upload dir");
    let (service, sink, notices) = service(upload_root.path());
    let mut received = notices.subscribe();

    let mut form: StepForm<QuoteDraft> = StepForm::new(quote_steps()).expect("quote steps");
    assert_eq!(form.state(), WizardState::Step(0));

    assert_eq!(form.next(form.draft().step_ready(0)), Transition::Blocked);
    form.draft_mut().items_description = "Hot tub and deck boards".to_string();
    form.draft_mut().load_size = Some(LoadSize::Half);

    let outcomes = service
        .upload_all(
            vec![
                UploadFile::new("tub.JPG", vec![0xff, 0xd8, 0xff, 0xe0]),
                UploadFile::new("deck.png", Vec::new()),
            ],
            "quotes/2025",
        )
        .await;
    assert!(outcomes[0].is_stored());
    assert!(!outcomes[1].is_stored());
    assert_eq!(
        received.try_recv().expect("empty file notice").level,
        NoticeLevel::Error
    );
    form.draft_mut()
        .photos
        .extend(outcomes.iter().filter_map(|outcome| outcome.locator().cloned()));
    assert_eq!(
        form.next(form.draft().step_ready(0)),
        Transition::Moved { from: 0, to: 1 }
    );

    form.draft_mut().address = "88 Riverside Dr".to_string();
    form.draft_mut().zip = "97202-1234".to_string();
    form.draft_mut().preferred_date = NaiveDate::from_ymd_opt(2025, 7, 12);
    assert_eq!(
        form.next(form.draft().step_ready(1)),
        Transition::Moved { from: 1, to: 2 }
    );

    let mut cancelled = false;
    assert_eq!(
        form.previous(|| cancelled = true),
        Transition::Moved { from: 2, to: 1 }
    );
    assert!(!cancelled);
    form.next(form.draft().step_ready(1));

    form.draft_mut().name = "Riley Chen".to_string();
    form.draft_mut().phone = "503.555.0117".to_string();
    form.draft_mut().email = "riley@example.com".to_string();
    assert!(form.draft().step_ready(2));

    let receipt = service
        .complete(form, Submission::Quote)
        .await
        .expect("quote stored");
    assert_eq!(receipt.kind, SubmissionKind::Quote);

    let records = sink.records.lock().expect("sink mutex");
    let Submission::Quote(stored) = &records[0].submission else {
        panic!("expected a quote submission");
    };
    assert_eq!(stored.photos.len(), 1);
    let photo = stored.photos[0].to_string();
    assert!(photo.starts_with("https://cdn.example.com/uploads/quotes/2025/"));
    assert!(photo.ends_with(".jpg"));

    let relative = photo.trim_start_matches("https://cdn.example.com/uploads/");
    let written = std::fs::read(upload_root.path().join(relative)).expect("photo on disk");
    assert_eq!(written, vec![0xff, 0xd8, 0xff, 0xe0]);
}

#[tokio::test]
async fn backing_out_of_first_step_cancels() {
    let mut form: StepForm<QuoteDraft> = StepForm::new(quote_steps()).expect("quote steps");
    form.draft_mut().items_description = "Piano".to_string();

    let mut cancelled = false;
    assert_eq!(form.previous(|| cancelled = true), Transition::Cancelled);
    assert!(cancelled);

    form.reset();
    assert_eq!(form.draft(), &QuoteDraft::default());
    assert_eq!(form.state(), WizardState::Step(0));
}
