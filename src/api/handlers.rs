//! HTTP request handlers for the pricing engine API.
//!
//! Every endpoint is a `POST` with a JSON body. Each request is tagged with
//! a correlation id that appears in every log line it produces.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    AfissResult, EmployeeCompensationBreakdown, EquipmentCostBreakdown, LoadoutCost,
    MarginPricing, TimeEstimateInput, afiss_from_catalog, calculate_equipment_cost,
    calculate_labor_cost, calculate_loadout_cost, estimate_time, lock_line_item, price_job,
    price_with_margin, reconcile, score,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ActualTotals, AuditStep, AuditTrace, AuditWarning, EmployeeCompensationInputs,
    EquipmentCostInputs, EstimateResult, Loadout, ProposalLineItem, WorkVolumeInput,
};

use super::request::{
    EstimateRequest, LineItemRequest, PriceRequest, ReconcileRequest, ReconcileResponse,
    ScoreRequest, ScoreResponse,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .route("/estimate", post(estimate_handler))
        .route("/price", post(price_handler))
        .route("/equipment-cost", post(equipment_cost_handler))
        .route("/labor-cost", post(labor_cost_handler))
        .route("/loadout-cost", post(loadout_cost_handler))
        .route("/line-items", post(line_item_handler))
        .route("/reconcile", post(reconcile_handler))
        .with_state(state)
}

/// Turns a JSON extraction failure into a 400 response.
fn parse_payload<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

/// Serializes a successful result or maps the engine error.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros() as u64,
                "Request completed successfully"
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Runs one endpoint: logs, parses the body and responds.
fn handle<Req, Res>(
    operation: &'static str,
    payload: Result<Json<Req>, JsonRejection>,
    perform: impl FnOnce(Req) -> EngineResult<Res>,
) -> Response
where
    Res: Serialize,
{
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, operation, "Processing request");

    match parse_payload(correlation_id, payload) {
        Ok(request) => respond(correlation_id, operation, started, perform(request)),
        Err(error) => error.into_response(),
    }
}

async fn score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    handle("score", payload, |request| perform_score(request, state.config()))
}

async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    handle("estimate", payload, |request| {
        perform_estimate(request, state.config())
    })
}

async fn price_handler(payload: Result<Json<PriceRequest>, JsonRejection>) -> Response {
    handle("price", payload, |request| -> EngineResult<MarginPricing> {
        price_with_margin(request.cost, request.target_margin_percent)
    })
}

async fn equipment_cost_handler(
    payload: Result<Json<EquipmentCostInputs>, JsonRejection>,
) -> Response {
    handle("equipment_cost", payload, |inputs| -> EngineResult<EquipmentCostBreakdown> {
        calculate_equipment_cost(&inputs)
    })
}

async fn labor_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeCompensationInputs>, JsonRejection>,
) -> Response {
    handle("labor_cost", payload, |inputs| -> EngineResult<EmployeeCompensationBreakdown> {
        calculate_labor_cost(&inputs, &state.config().settings().labor)
    })
}

async fn loadout_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<Loadout>, JsonRejection>,
) -> Response {
    handle("loadout_cost", payload, |loadout| -> EngineResult<LoadoutCost> {
        calculate_loadout_cost(&loadout, state.config().settings())
    })
}

async fn line_item_handler(
    State(state): State<AppState>,
    payload: Result<Json<LineItemRequest>, JsonRejection>,
) -> Response {
    handle("line_item", payload, |request| {
        perform_line_item(request, state.config())
    })
}

async fn reconcile_handler(payload: Result<Json<ReconcileRequest>, JsonRejection>) -> Response {
    handle("reconcile", payload, perform_reconcile)
}

/// Applies the selected AFISS factors to the work input.
///
/// With no factors selected the input's own multiplier is kept. Stump
/// grinding carries its modifiers per stump, so selecting factors for it
/// is rejected rather than silently ignored.
fn resolve_work(
    work: WorkVolumeInput,
    factor_ids: &[String],
    config: &ConfigLoader,
) -> EngineResult<(WorkVolumeInput, Option<AfissResult>)> {
    if factor_ids.is_empty() {
        return Ok((work, None));
    }
    if work.afiss_multiplier().is_none() {
        return Err(EngineError::invalid_input(
            "afiss_factor_ids",
            format!("'{}' does not take AFISS factors", work.service_type()),
        ));
    }

    let afiss = afiss_from_catalog(config.afiss_catalog(), factor_ids, &config.settings().afiss)?;
    Ok((work.with_afiss_multiplier(afiss.multiplier), Some(afiss)))
}

fn perform_score(request: ScoreRequest, config: &ConfigLoader) -> EngineResult<ScoreResponse> {
    let (work, afiss) = resolve_work(request.work, &request.afiss_factor_ids, config)?;
    let score = score(&work, &config.settings().scoring)?;

    Ok(ScoreResponse {
        proposable: score.is_proposable(),
        score,
        afiss,
    })
}

/// Collects numbered audit steps and warnings for one calculation.
#[derive(Default)]
struct TraceBuilder {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl TraceBuilder {
    fn record(&mut self, step: impl FnOnce(u32) -> AuditStep) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(step(step_number));
    }

    fn warn(&mut self, warning: AuditWarning) {
        self.warnings.push(warning);
    }

    fn finish(self, started: Instant) -> AuditTrace {
        AuditTrace {
            steps: self.steps,
            warnings: self.warnings,
            duration_us: started.elapsed().as_micros() as u64,
        }
    }
}

/// Scores, estimates and prices a job without locking it.
fn perform_estimate(request: EstimateRequest, config: &ConfigLoader) -> EngineResult<EstimateResult> {
    let started = Instant::now();
    let settings = config.settings();
    let service_type = request.work.service_type();
    let template = config.get_service_template(service_type)?;
    let mut trace = TraceBuilder::default();

    let (work, afiss) = resolve_work(request.work, &request.afiss_factor_ids, config)?;
    if let Some(afiss) = &afiss {
        trace.record(|n| afiss.audit_step(n, &request.afiss_factor_ids));
        if let Some(warning) = afiss.warning() {
            trace.warn(warning);
        }
    }

    let score = score(&work, &settings.scoring)?;
    trace.record(|n| score.audit_step(n));
    if !score.is_proposable() {
        trace.warn(AuditWarning::new(
            "not_proposable",
            format!(
                "Score {} is below the minimums and cannot be added to a proposal",
                score.adjusted_score.normalize()
            ),
            "high",
        ));
    }

    let (production_rate_pph, cost_per_hour) = match &request.loadout {
        Some(loadout) => {
            if loadout.service_type != service_type {
                return Err(EngineError::invalid_input(
                    "loadout",
                    format!(
                        "loadout '{}' is for '{}' but the work is '{}'",
                        loadout.id, loadout.service_type, service_type
                    ),
                ));
            }
            let cost = calculate_loadout_cost(loadout, settings)?;
            for line in &cost.equipment {
                trace.record(|n| line.breakdown.audit_step(n, &line.name));
            }
            for line in &cost.labor {
                trace.record(|n| line.breakdown.audit_step(n, &line.name));
            }
            (loadout.production_rate_pph, cost.total_cost_per_hour)
        }
        None => (template.standard_pph, template.standard_cost_per_hour),
    };

    let time_estimate = estimate_time(
        &TimeEstimateInput {
            service_type,
            adjusted_score: score.adjusted_score,
            production_rate_pph,
            drive_time_minutes: request.drive_time_minutes,
            transport_rate: request.transport_rate,
        },
        &settings.time,
    )?;
    trace.record(|n| time_estimate.audit_step(n));

    let target_margin_percent = request
        .target_margin_percent
        .unwrap_or(template.target_margin_percent);
    let pricing = price_job(&time_estimate, cost_per_hour, target_margin_percent)?;
    trace.record(|n| pricing.audit_step(n));

    Ok(EstimateResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        service_type,
        score,
        time_estimate,
        pricing,
        audit_trace: trace.finish(started),
    })
}

fn perform_line_item(request: LineItemRequest, config: &ConfigLoader) -> EngineResult<ProposalLineItem> {
    let template = config.get_service_template(request.work.service_type())?;
    let (work, _) = resolve_work(request.work, &request.afiss_factor_ids, config)?;

    let item = lock_line_item(&work, template, request.drive_time_minutes, config.settings())?;
    info!(
        line_item_id = %item.id(),
        service_type = %item.service_type(),
        client_price = %item.client_price().round_dp(2),
        "Locked proposal line item"
    );
    Ok(item)
}

fn perform_reconcile(request: ReconcileRequest) -> EngineResult<ReconcileResponse> {
    let actual = ActualTotals::from_entries(&request.time_entries)?;
    let summary = reconcile(&request.line_item, &actual)?;

    Ok(ReconcileResponse {
        outcomes: (&summary).into(),
        summary,
    })
}
