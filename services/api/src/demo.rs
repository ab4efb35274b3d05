use crate::infra::InMemorySubmissionStore;
use chrono::{Duration, Local};
use clap::Args;
use haulsite::error::AppError;
use haulsite::intake::{
    quote_steps, AnalyticsContext, DiskUploadSink, IntakeError, IntakeService, LoadSize,
    MemoryAnalytics, NoticeBus, QuoteDraft, StepForm, Submission, Transition, UploadFile,
    UploadOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Directory the demo photo is written to
    #[arg(long, default_value = "demo-uploads")]
    pub(crate) upload_dir: PathBuf,
    /// Base URL that locators are built from
    #[arg(long, default_value = "http://127.0.0.1:3000/uploads")]
    pub(crate) public_base_url: String,
}

// Smallest valid GIF: one transparent pixel.
const DEMO_PHOTO: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x01, 0x44, 0x00, 0x3b,
];

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        upload_dir,
        public_base_url,
    } = args;

    let store = Arc::new(InMemorySubmissionStore::default());
    let notices = NoticeBus::default();
    let mut inbox = notices.subscribe();
    let service = IntakeService::new(
        store.clone(),
        Arc::new(DiskUploadSink::new(upload_dir.clone(), public_base_url)),
        notices,
        AnalyticsContext::new(Arc::new(MemoryAnalytics::default())),
        1024 * 1024,
    );

    println!("Quote request demo (uploads under {})", upload_dir.display());
    let mut form: StepForm<QuoteDraft> = StepForm::new(quote_steps()).map_err(IntakeError::Wizard)?;
    describe(&form);

    let blocked = form.next(form.draft().step_ready(0));
    println!("- Continue with an empty step: {}", transition_label(blocked));

    form.draft_mut().items_description = "Old recliner, box spring and a broken treadmill".into();
    form.draft_mut().load_size = Some(LoadSize::Quarter);
    match service
        .upload(UploadFile::new("garage.gif", DEMO_PHOTO), "quotes/demo")
        .await
    {
        UploadOutcome::Stored(locator) => {
            println!("- Photo stored at {locator}");
            form.draft_mut().photos.push(locator);
        }
        UploadOutcome::Failed { notice, .. } => {
            println!("- Photo upload failed: {}", notice.message)
        }
    }
    advance(&mut form);

    form.draft_mut().address = "4410 N Williams Ave".into();
    form.draft_mut().zip = "97217".into();
    form.draft_mut().preferred_date = Some(Local::now().date_naive() + Duration::days(3));
    advance(&mut form);

    form.draft_mut().name = "Avery Morgan".into();
    form.draft_mut().phone = "(503) 555-0186".into();
    form.draft_mut().email = "avery@example.com".into();
    if !form.draft().step_ready(2) {
        println!("- Contact details incomplete; stopping");
        return Ok(());
    }

    match service.complete(form, Submission::Quote).await {
        Ok(receipt) => println!(
            "- Submitted {} at {}",
            receipt.id,
            receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Err(err) => println!("- Submission failed: {err}"),
    }

    while let Ok(notice) = inbox.try_recv() {
        println!("  Notice [{:?}] {}", notice.level, notice.message);
    }
    println!("Stored submissions: {}", store.records().len());
    Ok(())
}

fn describe(form: &StepForm<QuoteDraft>) {
    for (index, step) in form.steps().iter().enumerate() {
        println!("  {}. {} - {}", index + 1, step.name, step.description);
    }
}

fn advance(form: &mut StepForm<QuoteDraft>) {
    let index = form.current_index().unwrap_or(0);
    let transition = form.next(form.draft().step_ready(index));
    println!("- Continue from step {}: {}", index + 1, transition_label(transition));
}

fn transition_label(transition: Transition) -> String {
    match transition {
        Transition::Moved { from, to } => format!("moved {} -> {}", from + 1, to + 1),
        Transition::Blocked => "blocked (required fields missing)".to_string(),
        Transition::Cancelled => "cancelled".to_string(),
    }
}
