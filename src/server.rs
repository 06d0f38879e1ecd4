use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::agronomy::soil::{inspect_crop, CropCard};
use crate::config::Config;
use crate::error::ValidationError;
use crate::funding::category::suggest_for_category;
use crate::funding::profile::{recommend_for_profile, FarmerProfile};
use crate::funding::{FundingCatalog, FundingMatch};
use crate::pipeline::runner::evaluate;
use crate::pipeline::validate::{validate_profile, validate_request};
use crate::pipeline::{EvaluationReport, EvaluationRequest};
use crate::reference::{CropCategory, ReferenceData};

#[derive(Clone)]
pub struct ApiState {
    config: Config,
    reference: Arc<ReferenceData>,
    catalog: Arc<FundingCatalog>,
}

impl ApiState {
    pub fn new(config: Config, reference: ReferenceData, catalog: FundingCatalog) -> Self {
        Self {
            config,
            reference: Arc::new(reference),
            catalog: Arc::new(catalog),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::bad_request(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    crops: usize,
    funding_lines: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct FundingRequest {
    farmer: FarmerProfile,
    #[serde(default)]
    category: Option<CropCategory>,
}

#[derive(Debug, Serialize)]
struct FundingResponse {
    category_funding: Vec<FundingMatch>,
    profile_funding: Vec<FundingMatch>,
}

pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/crops", get(list_crops))
        .route("/v1/crops/:name", get(crop_card))
        .route("/v1/evaluate", post(evaluate_crop))
        .route("/v1/funding", post(funding))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let reference = config.load_reference_data()?;
    let catalog = config.load_funding_catalog()?;
    let app = build_router(ApiState::new(config, reference, catalog));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<ApiState>) -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        crops: state.reference.crop_names().len(),
        funding_lines: state.catalog.len(),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config.clone())
}

async fn list_crops(State(state): State<ApiState>) -> Json<ApiResponse<Vec<String>>> {
    ok(state.reference.crop_names())
}

async fn crop_card(State(state): State<ApiState>, Path(name): Path<String>) -> ApiResult<CropCard> {
    inspect_crop(&state.reference, &state.config.region, &name)
        .map(ok)
        .ok_or_else(|| ApiError::not_found(format!("unknown crop: {name}")))
}

async fn evaluate_crop(
    State(state): State<ApiState>,
    Json(request): Json<EvaluationRequest>,
) -> ApiResult<EvaluationReport> {
    validate_request(&request)?;
    let report = evaluate(&state.reference, &state.catalog, &state.config.region, &request)?;
    Ok(ok(report))
}

async fn funding(
    State(state): State<ApiState>,
    Json(request): Json<FundingRequest>,
) -> ApiResult<FundingResponse> {
    validate_profile(&request.farmer)?;
    Ok(ok(FundingResponse {
        category_funding: suggest_for_category(&state.catalog, request.category),
        profile_funding: recommend_for_profile(&state.catalog, &request.farmer),
    }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}
