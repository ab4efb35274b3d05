use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemorySubmissionStore};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use haulsite::config::AppConfig;
use haulsite::error::AppError;
use haulsite::intake::{
    AnalyticsContext, DiskUploadSink, IntakeService, MemoryAnalytics, NoticeBus,
};
use haulsite::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        upload_dir: Arc::new(config.uploads.upload_dir.clone()),
    };

    let catalog = Arc::new(load_catalog(&config.content).await);

    tokio::fs::create_dir_all(&config.uploads.upload_dir).await?;
    let uploads = Arc::new(DiskUploadSink::new(
        config.uploads.upload_dir.clone(),
        config.uploads.public_base_url.clone(),
    ));
    let intake = Arc::new(IntakeService::new(
        Arc::new(InMemorySubmissionStore::default()),
        uploads,
        NoticeBus::default(),
        AnalyticsContext::new(Arc::new(MemoryAnalytics::default())),
        config.uploads.max_upload_bytes,
    ));

    let app = with_site_routes(catalog, intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "haulsite api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
