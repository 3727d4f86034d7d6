use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use esg_engine::error::AppError;
use esg_engine::workflows::assessment::report::views::{ViolationEntry, ViolationReportSummary};
use esg_engine::workflows::assessment::{
    assessment_router, AlertPublisher, AssessmentId, AssessmentRepository, AssessmentService,
    AssessmentServiceError, RepositoryError, ViolationReport,
};
use esg_engine::workflows::emissions::{
    calculate, resolve, selectable_entries, CalculationError, FactorTable, SelectionPath,
};

pub(crate) fn with_esg_routes<R, A>(service: Arc<AssessmentService<R, A>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    assessment_router(service.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/esg/assessments/:assessment_id/report",
            axum::routing::get(move |path, query| {
                violation_report_endpoint(path, query, service.clone())
            }),
        )
        .route(
            "/api/v1/esg/emissions/calculate",
            axum::routing::post(calculate_endpoint),
        )
        .route(
            "/api/v1/esg/emissions/options",
            axum::routing::get(options_endpoint),
        )
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

#[derive(Debug, Deserialize)]
pub(crate) struct ViolationReportQuery {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) assessed_on: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ViolationReportResponse {
    pub(crate) assessment_id: String,
    pub(crate) company: String,
    #[serde(flatten)]
    pub(crate) summary: ViolationReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) critical_pages: Option<Vec<Vec<ViolationEntry>>>,
}

pub(crate) async fn violation_report_endpoint<R, A>(
    Path(assessment_id): Path<String>,
    Query(query): Query<ViolationReportQuery>,
    service: Arc<AssessmentService<R, A>>,
) -> Result<Json<ViolationReportResponse>, AppError>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    let record = service.get(&id)?;
    let result = record
        .result
        .as_ref()
        .ok_or(AssessmentServiceError::Repository(RepositoryError::NotFound))?;

    let assessed_on = query
        .assessed_on
        .unwrap_or_else(|| Local::now().date_naive());
    let report = ViolationReport::from_result(result);
    let summary = report.summary(assessed_on);

    let critical_pages = match query.page_size {
        Some(page_size) => Some(summary.critical_pages(page_size)?),
        None => None,
    };

    Ok(Json(ViolationReportResponse {
        assessment_id: record.assessment_id.0.clone(),
        company: record.company.clone(),
        summary,
        critical_pages,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalculationRequest {
    pub(crate) activity_amount: String,
    #[serde(default)]
    pub(crate) emission_factor: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) separate: Option<String>,
    #[serde(default)]
    pub(crate) raw_material: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct CalculationResponse {
    pub(crate) resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) kg_co2eq: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) total_emission: Option<Decimal>,
}

/// Resolution misses clear the unit and factor fields instead of failing; a
/// user may still be mid-selection.
pub(crate) fn run_calculation(
    request: &CalculationRequest,
    table: &FactorTable,
) -> Result<CalculationResponse, AppError> {
    let lookup = match (&request.category, &request.separate, &request.raw_material) {
        (Some(category), Some(separate), Some(raw_material)) => Some(SelectionPath {
            category: category.clone(),
            separate: separate.clone(),
            raw_material: raw_material.clone(),
        }),
        _ => None,
    };

    let cleared = CalculationResponse {
        resolved: false,
        unit: None,
        kg_co2eq: None,
        total_emission: None,
    };

    let (unit, factor) = match (&lookup, &request.emission_factor) {
        (Some(path), _) => match resolve(path, table) {
            Some(entry) => (Some(entry.unit.clone()), entry.kg_co2eq),
            None => return Ok(cleared),
        },
        (None, Some(raw)) => {
            let factor = raw.trim().parse::<Decimal>().map_err(|_| {
                AppError::Calculation(CalculationError::NotANumber { raw: raw.clone() })
            })?;
            (None, factor)
        }
        (None, None) => return Ok(cleared),
    };

    let activity = request
        .activity_amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_| {
            AppError::Calculation(CalculationError::NotANumber {
                raw: request.activity_amount.clone(),
            })
        })?;
    let total = calculate(activity, factor)?;

    Ok(CalculationResponse {
        resolved: true,
        unit,
        kg_co2eq: Some(factor),
        total_emission: Some(total),
    })
}

pub(crate) async fn calculate_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<CalculationResponse>, AppError> {
    run_calculation(&request, &state.factors).map(Json)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionsQuery {
    #[serde(default)]
    pub(crate) activity: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) separate: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionsResponse {
    pub(crate) activities: Vec<&'static str>,
    pub(crate) categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) separates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) raw_materials: Option<Vec<String>>,
}

/// Option listings for the cascading selectors, honoring the declarative
/// activity filters.
pub(crate) fn selector_options(query: &OptionsQuery, table: &FactorTable) -> OptionsResponse {
    let entries = match &query.activity {
        Some(activity) => selectable_entries(activity, table),
        None => table.entries().iter().collect(),
    };

    let categories = dedup(entries.iter().map(|entry| entry.category.as_str()));

    let separates = query.category.as_ref().map(|category| {
        dedup(
            entries
                .iter()
                .filter(|entry| &entry.category == category)
                .map(|entry| entry.separate.as_str()),
        )
    });

    let raw_materials = match (&query.category, &query.separate) {
        (Some(category), Some(separate)) => Some(dedup(
            entries
                .iter()
                .filter(|entry| &entry.category == category && &entry.separate == separate)
                .map(|entry| entry.raw_material.as_str()),
        )),
        _ => None,
    };

    OptionsResponse {
        activities: esg_engine::workflows::emissions::activities(),
        categories,
        separates,
        raw_materials,
    }
}

pub(crate) async fn options_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<OptionsQuery>,
) -> Json<OptionsResponse> {
    Json(selector_options(&query, &state.factors))
}

fn dedup<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut ordered = Vec::new();
    for value in values {
        if seen.insert(value) {
            ordered.push(value.to_string());
        }
    }
    ordered
}
