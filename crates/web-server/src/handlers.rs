use crate::requests::{MortgageRequest, RoiRequest};
use crate::{error::AppError, AppState, SERVICE_NAME};
use analytics::MarketReport;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use core_types::PropertyRecord;
use finance::{
    AffordabilityAssessment, AffordabilityParams, CashFlowParams, CashFlowSummary,
    MortgageRepayment, ScenarioProjection,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SuburbQuery {
    pub suburb: Option<String>,
}

impl SuburbQuery {
    fn required(&self) -> Result<&str, AppError> {
        self.suburb
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                tracing::warn!("No suburb parameter provided.");
                AppError::BadRequest("Suburb parameter is required".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
pub struct SuburbAnalytics {
    pub suburb: String,
    pub listings: Vec<PropertyRecord>,
    pub report: MarketReport,
}

#[derive(Debug, Serialize)]
pub struct RoiResponse {
    pub scenarios: Vec<ScenarioProjection>,
    pub gross_rental_yield_pct: Option<Decimal>,
}

/// # GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "endpoints": {
            "/api/suburb/properties": "GET - Fetch properties for a suburb (param: suburb)",
            "/api/suburb/analytics": "GET - Market report for a suburb (param: suburb)",
            "/api/analytics": "POST - Market report for a posted listings payload",
            "/api/finance/mortgage": "POST - Mortgage repayments",
            "/api/finance/roi": "POST - ROI scenarios",
            "/api/finance/cash-flow": "POST - Rental cash flow",
            "/api/finance/affordability": "POST - Borrowing capacity",
            "/health": "GET - Health check"
        }
    }))
}

/// # GET /health
pub async fn health() -> Json<Value> {
    tracing::debug!("Health check requested.");
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

/// # GET /api/suburb/properties
/// Proxies the upstream listings, passing its status and sanitized body through.
pub async fn get_suburb_properties(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuburbQuery>,
) -> Result<Response, AppError> {
    let suburb = query.required()?;
    tracing::info!(suburb, "Received request for suburb.");

    let upstream = state.source.fetch_raw(suburb).await?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(upstream.body)).into_response())
}

/// # GET /api/suburb/analytics
pub async fn get_suburb_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuburbQuery>,
) -> Result<Json<SuburbAnalytics>, AppError> {
    let suburb = query.required()?;
    let listings = state.source.fetch_properties(suburb).await?;
    let report = state.engine.analyze(&listings, Utc::now());
    Ok(Json(SuburbAnalytics {
        suburb: suburb.to_string(),
        listings,
        report,
    }))
}

/// # POST /api/analytics
/// Accepts either a list of listings or an object with a `results` list.
pub async fn post_analytics(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<MarketReport>, AppError> {
    let listings = core_types::parse_payload(payload)?;
    Ok(Json(state.engine.analyze(&listings, Utc::now())))
}

/// # POST /api/finance/mortgage
pub async fn post_mortgage(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MortgageRequest>,
) -> Result<Json<MortgageRepayment>, AppError> {
    let params = request.resolve(&state.config.finance)?;
    Ok(Json(finance::mortgage_repayment(&params)?))
}

/// # POST /api/finance/roi
pub async fn post_roi(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoiRequest>,
) -> Result<Json<RoiResponse>, AppError> {
    let params = request.resolve(&state.config.finance);
    let scenarios = finance::project_roi(&params)?;
    let gross_rental_yield_pct = request
        .weekly_rent
        .map(|rent| finance::gross_rental_yield(rent, request.price))
        .transpose()?;
    Ok(Json(RoiResponse {
        scenarios,
        gross_rental_yield_pct,
    }))
}

/// # POST /api/finance/cash-flow
pub async fn post_cash_flow(
    Json(params): Json<CashFlowParams>,
) -> Result<Json<CashFlowSummary>, AppError> {
    Ok(Json(finance::cash_flow(&params)?))
}

/// # POST /api/finance/affordability
pub async fn post_affordability(
    Json(params): Json<AffordabilityParams>,
) -> Result<Json<AffordabilityAssessment>, AppError> {
    Ok(Json(finance::assess_affordability(&params)?))
}
