//! Quote and careers intake: the step-form controller, file uploads and submission.

pub mod analytics;
pub mod forms;
pub mod notices;
pub mod router;
pub mod service;
pub mod submission;
pub mod upload;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use analytics::{
    AnalyticsContext, AnalyticsError, AnalyticsEvent, AnalyticsSink, MemoryAnalytics,
    RecordedEvent,
};
pub use forms::{career_steps, quote_steps, Availability, CareerDraft, LoadSize, QuoteDraft};
pub use notices::{Notice, NoticeBus, NoticeLevel};
pub use router::{intake_router, FILE_NAME_HEADER};
pub use service::{IntakeError, IntakeService};
pub use submission::{
    Submission, SubmissionError, SubmissionId, SubmissionKind, SubmissionReceipt,
    SubmissionRecord, SubmissionSink,
};
pub use upload::{
    storage_path, DiskUploadSink, FailureCause, FileUploader, Locator, UploadError, UploadFile,
    UploadOutcome, UploadSink,
};
pub use wizard::{
    FormStep, ReplayError, StepBlocked, StepForm, SubmitError, Transition, WizardError,
    WizardState,
};
