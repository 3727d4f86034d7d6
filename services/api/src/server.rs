use crate::cli::ServeArgs;
use crate::infra::{load_factor_table, AppState, InMemoryAlertPublisher, InMemoryAssessmentRepository};
use crate::routes::with_esg_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use esg_engine::config::AppConfig;
use esg_engine::error::AppError;
use esg_engine::telemetry;
use esg_engine::workflows::assessment::{AssessmentService, QuestionCatalog};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let factors = Arc::new(load_factor_table(&config.factors)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        factors: factors.clone(),
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let assessment_service = Arc::new(AssessmentService::new(
        repository,
        alerts,
        QuestionCatalog::standard(),
    ));

    let app = with_esg_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        factor_rows = factors.len(),
        "supplier ESG service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
