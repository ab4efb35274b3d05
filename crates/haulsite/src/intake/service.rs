use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::analytics::AnalyticsContext;
use super::forms::{career_steps, quote_steps, CareerDraft, QuoteDraft};
use super::notices::{Notice, NoticeBus};
use super::submission::{
    Submission, SubmissionError, SubmissionId, SubmissionKind, SubmissionReceipt,
    SubmissionRecord, SubmissionSink,
};
use super::upload::{FileUploader, UploadFile, UploadOutcome, UploadSink};
use super::wizard::{ReplayError, StepBlocked, StepForm, SubmitError, WizardError};

/// Service composing the form wizards, upload delegate and submission sink.
pub struct IntakeService<S, U> {
    sink: Arc<S>,
    uploader: FileUploader<U>,
    notices: NoticeBus,
    analytics: AnalyticsContext,
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id(kind: SubmissionKind) -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("{}-{id:06}", kind.label()))
}

impl<S, U> IntakeService<S, U>
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    pub fn new(
        sink: Arc<S>,
        uploads: Arc<U>,
        notices: NoticeBus,
        analytics: AnalyticsContext,
        max_upload_bytes: usize,
    ) -> Self {
        let uploader = FileUploader::new(uploads, notices.clone(), max_upload_bytes);
        Self {
            sink,
            uploader,
            notices,
            analytics,
        }
    }

    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    pub fn analytics(&self) -> &AnalyticsContext {
        &self.analytics
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.uploader.max_bytes()
    }

    /// Validate every step of a quote draft and persist it.
    pub async fn submit_quote(&self, draft: QuoteDraft) -> Result<SubmissionReceipt, IntakeError> {
        let form = StepForm::replay(quote_steps(), draft, |index, draft| {
            draft.step_ready(index)
        })?;
        self.complete(form, Submission::Quote).await
    }

    /// Validate every step of a careers application and persist it.
    pub async fn submit_career_application(
        &self,
        draft: CareerDraft,
    ) -> Result<SubmissionReceipt, IntakeError> {
        let form = StepForm::replay(career_steps(), draft, |index, draft| {
            draft.step_ready(index)
        })?;
        self.complete(form, Submission::Career).await
    }

    /// Submit a wizard the caller already walked to its final step.
    pub async fn complete<D>(
        &self,
        mut form: StepForm<D>,
        wrap: fn(D) -> Submission,
    ) -> Result<SubmissionReceipt, IntakeError>
    where
        D: Clone + Send,
    {
        let sink = Arc::clone(&self.sink);
        let result = form
            .submit(|draft| async move {
                let submission = wrap(draft);
                let record = SubmissionRecord {
                    id: next_submission_id(submission.kind()),
                    submitted_at: Utc::now(),
                    submission,
                };
                let receipt = record.receipt();
                sink.persist(record).await.map(|()| receipt)
            })
            .await;

        match result {
            Ok(receipt) => {
                info!(id = %receipt.id, kind = receipt.kind.label(), "submission stored");
                self.notices
                    .publish(Notice::success("Thanks! We received your submission."));
                self.analytics
                    .event("form_submitted", [("kind", receipt.kind.label())]);
                Ok(receipt)
            }
            Err(SubmitError::Failed(err)) => {
                warn!(error = %err, "submission failed");
                self.notices.publish(Notice::error(
                    "We couldn't send your form. Please try again in a moment.",
                ));
                Err(IntakeError::Submission(err))
            }
            Err(SubmitError::Wizard(err)) => Err(IntakeError::Wizard(err)),
        }
    }

    pub async fn upload(&self, file: UploadFile, folder: &str) -> UploadOutcome {
        let outcome = self.uploader.upload(file, folder).await;
        self.track_upload(&outcome, folder);
        outcome
    }

    pub async fn upload_all(&self, files: Vec<UploadFile>, folder: &str) -> Vec<UploadOutcome> {
        let outcomes = self.uploader.upload_all(files, folder).await;
        for outcome in &outcomes {
            self.track_upload(outcome, folder);
        }
        outcomes
    }

    fn track_upload(&self, outcome: &UploadOutcome, folder: &str) {
        if outcome.is_stored() {
            self.analytics.event("file_uploaded", [("folder", folder)]);
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("step {} ({}) is incomplete", .0.index + 1, .0.name)]
    Incomplete(StepBlocked),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

impl From<ReplayError> for IntakeError {
    fn from(value: ReplayError) -> Self {
        match value {
            ReplayError::Blocked(blocked) => Self::Incomplete(blocked),
            ReplayError::Wizard(err) => Self::Wizard(err),
        }
    }
}
