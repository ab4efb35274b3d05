use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use haulsite::content::{content_router, ContentCatalog};
use haulsite::intake::{intake_router, IntakeService, SubmissionSink, UploadSink};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

pub(crate) fn with_site_routes<S, U>(
    catalog: Arc<ContentCatalog>,
    intake: Arc<IntakeService<S, U>>,
) -> Router
where
    S: SubmissionSink + 'static,
    U: UploadSink + 'static,
{
    content_router(catalog)
        .merge(intake_router(intake))
        .merge(operational_routes())
}

pub(crate) fn operational_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/uploads/*path", get(uploaded_file_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Serves files written by the disk upload sink.
pub(crate) async fn uploaded_file_endpoint(
    Extension(state): Extension<AppState>,
    Path(path): Path<String>,
) -> Response {
    let climbs_out = path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if climbs_out || path.contains('\\') {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(state.upload_dir.join(&path)).await {
        Ok(bytes) => {
            let content_type = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(err) => {
            warn!(%path, error = %err, "failed to read uploaded file");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
