use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::error::AppError;

use super::analytics::AnalyticsEvent;
use super::forms::{CareerDraft, QuoteDraft};
use super::service::IntakeService;
use super::submission::{SubmissionSink, SubmissionReceipt};
use super::upload::{FailureCause, UploadFile, UploadOutcome, UploadSink};

/// Header carrying the original file name of a raw upload body.
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// Router builder exposing the quote, careers, upload and analytics endpoints.
pub fn intake_router<S, U>(service: Arc<IntakeService<S, U>>) -> Router
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    let upload_limit = service.max_upload_bytes();
    Router::new()
        .route("/api/v1/quotes", post(quote_handler::<S, U>))
        .route(
            "/api/v1/careers/applications",
            post(career_handler::<S, U>),
        )
        .route(
            "/api/v1/uploads/*folder",
            post(upload_handler::<S, U>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/analytics/events", post(analytics_handler::<S, U>))
        .with_state(service)
}

pub(crate) async fn quote_handler<S, U>(
    State(service): State<Arc<IntakeService<S, U>>>,
    Json(draft): Json<QuoteDraft>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    let receipt = service.submit_quote(draft).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn career_handler<S, U>(
    State(service): State<Arc<IntakeService<S, U>>>,
    Json(draft): Json<CareerDraft>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    let receipt = service.submit_career_application(draft).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn upload_handler<S, U>(
    State(service): State<Arc<IntakeService<S, U>>>,
    Path(folder): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    let name = headers
        .get(FILE_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("upload")
        .to_string();

    match service.upload(UploadFile::new(name, body.to_vec()), &folder).await {
        UploadOutcome::Stored(locator) => {
            (StatusCode::CREATED, Json(json!({ "locator": locator }))).into_response()
        }
        UploadOutcome::Failed { notice, cause } => {
            let status = match cause {
                FailureCause::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
                FailureCause::Storage => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({
                "error": notice.message,
            });
            (status, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn analytics_handler<S, U>(
    State(service): State<Arc<IntakeService<S, U>>>,
    Json(event): Json<AnalyticsEvent>,
) -> StatusCode
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    service.analytics().track(event);
    StatusCode::ACCEPTED
}
