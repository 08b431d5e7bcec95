//! HTTP routes for uploading structure photos and returning reports.

use crate::analysis::{engineering_analysis, EngineeringAnalysis};
use crate::caption::Captioner;
use crate::error::AppError;
use crate::image_prep::decode_upload;
use crate::report::{generate_engineering_report, DISCLAIMER};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Room for the prompt field and multipart framing on top of the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

const INDEX_HTML: &str = include_str!("index.html");

/// Shared by every handler.
pub struct AppState {
    pub captioner: Arc<dyn Captioner>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub analysis: EngineeringAnalysis,
    pub report: String,
    pub disclaimer: &'static str,
    pub processing_time_ms: u128,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub caption: String,
    #[serde(default)]
    pub prompt: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze_upload))
        .route("/api/report", post(report_from_caption))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_response(caption: String, prompt: &str, model: Option<String>, start: Instant) -> ReportResponse {
    let analysis = engineering_analysis(&caption);
    // Form input is trimmed here so a blank text area gets the default focus.
    let report = generate_engineering_report(&caption, prompt.trim());

    info!(
        risk = %analysis.risk,
        rules = ?analysis.matched_rules,
        "Engineering analysis complete"
    );

    ReportResponse {
        caption,
        model,
        analysis,
        report,
        disclaimer: DISCLAIMER,
        processing_time_ms: start.elapsed().as_millis(),
    }
}

async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ReportResponse>, AppError> {
    let start = Instant::now();

    let mut image_bytes = None;
    let mut prompt = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => image_bytes = Some(field.bytes().await?),
            Some("prompt") => prompt = field.text().await?,
            other => debug!(field = ?other, "Ignoring form field"),
        }
    }

    let image_bytes = image_bytes.ok_or(AppError::MissingImage)?;
    debug!(upload_bytes = image_bytes.len(), prompt_len = prompt.len(), "Received upload");

    let image = decode_upload(&image_bytes, state.max_upload_bytes)?;
    let caption = state.captioner.caption(&image).await?;

    let model = Some(state.captioner.model_name().to_string());
    Ok(Json(build_response(caption, &prompt, model, start)))
}

async fn report_from_caption(Json(request): Json<ReportRequest>) -> Result<Json<ReportResponse>, AppError> {
    let start = Instant::now();

    let caption = request.caption.trim();
    if caption.is_empty() {
        return Err(AppError::EmptyCaption);
    }

    Ok(Json(build_response(caption.to_string(), &request.prompt, None, start)))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
