//! Axum router and HTTP handlers.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use tubo_core::clock::deposit_instant;
use tubo_core::compound::build_log;
use tubo_core::constants::TERM_MINUTES;
use tubo_core::error::ValidationError;
use tubo_core::request::{
    DepositRequest, GenerateDatesBody, TenMinuteCalculateBody, TenMinuteCalculateRequest,
    TenMinuteStartBody, TenMinuteStartRequest,
};
use tubo_core::ten_minute::{self, TenMinuteConstants, TenMinuteQuote, TenMinuteValuation};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
        ]);

    let assets = ServeDir::new(&state.config.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health).options(options_ok))
        .route("/generate-dates", post(generate_dates).options(options_ok))
        .route("/ten-minute-compound/start", post(ten_minute_start).options(options_ok))
        .route(
            "/ten-minute-compound/calculate",
            post(ten_minute_calculate).options(options_ok),
        )
        .fallback_service(assets)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Plain `OPTIONS` without preflight headers; `CorsLayer` answers real preflights.
async fn options_ok() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDatesResponse {
    pub available_balance: f64,
    pub interest_rate: f64,
    pub term_minutes: u32,
    pub rate_per_minute: f64,
    /// Deposit instant in epoch milliseconds.
    pub deposit_timestamp: i64,
    pub logs: Vec<String>,
}

/// `POST /generate-dates` — resolve the rate and build the compounding log.
async fn generate_dates(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<GenerateDatesResponse> {
    let body: GenerateDatesBody = json_body(body)?;
    let req = DepositRequest::parse(&body, state.config.max_log_minutes)?;

    let deposit = deposit_instant(req.start_date, state.clock.now())?;
    let interest_rate = state.rates.rate_for(&state.config.rate_tier, req.amount)?;

    let log = build_log(req.amount, interest_rate, TERM_MINUTES, deposit, req.log_minutes)
        .map_err(|e| {
            debug!(error = %e, "deposit instant too close to the end of the calendar");
            ValidationError::StartDate
        })?;

    info!(
        amount = req.amount,
        interest_rate,
        log_minutes = req.log_minutes,
        "Compounding log generated"
    );

    Ok(Json(GenerateDatesResponse {
        available_balance: req.available_balance(),
        interest_rate,
        term_minutes: TERM_MINUTES,
        rate_per_minute: log.rate_per_minute,
        deposit_timestamp: deposit.timestamp_millis(),
        logs: log.lines(),
    }))
}

#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    fn new(body: T) -> Json<Self> {
        Json(Self {
            success: true,
            body,
        })
    }
}

/// `POST /ten-minute-compound/start` — derived growth rates for a deposit.
async fn ten_minute_start(
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Success<TenMinuteQuote>> {
    let body: TenMinuteStartBody = json_body(body)?;
    let req = TenMinuteStartRequest::parse(&body)?;
    let quote = ten_minute::start(&TenMinuteConstants::default(), req.initial_deposit);
    debug!(initial_deposit = req.initial_deposit, "Ten-minute compound started");
    Ok(Success::new(quote))
}

/// `POST /ten-minute-compound/calculate` — value after the elapsed time.
async fn ten_minute_calculate(
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Success<TenMinuteValuation>> {
    let body: TenMinuteCalculateBody = json_body(body)?;
    let req = TenMinuteCalculateRequest::parse(&body)?;
    let valuation = ten_minute::calculate(
        &TenMinuteConstants::default(),
        req.initial_deposit,
        req.elapsed_minutes,
        req.elapsed_seconds,
    );
    Ok(Success::new(valuation))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const NOT_AN_OBJECT: &str = "Invalid JSON body: expected a JSON object.";

/// Decode a request body that must be a JSON object.
///
/// Arrays are refused up front; serde would otherwise bind them to the
/// body's fields by position.
fn json_body<T: DeserializeOwned>(body: Result<Json<Value>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;
    if !value.is_object() {
        return Err(ApiError::BadRequest(NOT_AN_OBJECT.to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// Map a handler panic to the generic 500 body.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    ApiError::Internal(detail).into_response()
}
