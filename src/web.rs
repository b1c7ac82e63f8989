//! Axum web layer: home page with the mode selector and free-text input,
//! the rendered map document, and a health endpoint.
//!
//! Rendered map documents are cached in Moka keyed by `mode|query`; the
//! dataset and region index behind them never change after startup.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::aggregate::aggregate;
use crate::config::DataPaths;
use crate::data::Dataset;
use crate::map::{HeatmapOptions, MapView, OutlineStyle, EMBED_HEIGHT, EMBED_WIDTH};
use crate::region_index::RegionIndex;
use crate::search::{search, SearchMode};

const PAGE_TITLE: &str = "Bản đồ Dược liệu Việt Nam";

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub index: Arc<RegionIndex>,
    pub map_cache: Cache<String, String>,
}

impl AppState {
    /// Load the dataset and derive the region index, once per process.
    pub fn new(paths: &DataPaths) -> anyhow::Result<Self> {
        tracing::info!("loading dataset...");
        let dataset = Dataset::load(paths)?;

        tracing::info!("building region index...");
        let index = RegionIndex::build(&dataset.plants, &dataset.provinces);

        let map_cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Ok(Self {
            dataset: Arc::new(dataset),
            index: Arc::new(index),
            map_cache,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/map", get(map_page))
        .route("/health", get(health_check))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    mode: Option<String>,
    q: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    title: String,
    plant_count: usize,
    province_count: usize,
    mode: String,
    query: String,
    searched: bool,
    match_count: usize,
    province_hits: usize,
    map_src: String,
    map_width: u32,
    map_height: u32,
}

async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let mode = params.mode.unwrap_or_else(|| "disease".to_string());
    let query = params.q.unwrap_or_default();

    let mut template = HomeTemplate {
        title: PAGE_TITLE.to_string(),
        plant_count: state.dataset.plants.len(),
        province_count: state.dataset.provinces.len(),
        mode: mode.clone(),
        query: query.clone(),
        searched: false,
        match_count: 0,
        province_hits: 0,
        map_src: String::new(),
        map_width: EMBED_WIDTH,
        map_height: EMBED_HEIGHT,
    };

    // Empty input never triggers a search; the form just renders.
    if !query.is_empty() {
        let parsed: SearchMode = mode
            .parse()
            .map_err(|e: crate::search::UnknownMode| AppError::BadRequest(e.to_string()))?;

        let matched = search(&state.dataset.plants, parsed, &query);
        let points = aggregate(&matched, &state.index);

        template.searched = true;
        template.match_count = matched.len();
        template.province_hits = points.len();
        template.map_src = format!("/map?mode={}&q={}", mode, urlencoding::encode(&query));
    }

    render_html(template)
}

async fn map_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let mode = params.mode.unwrap_or_else(|| "disease".to_string());
    let query = params.q.unwrap_or_default();

    let parsed: SearchMode = mode
        .parse()
        .map_err(|e: crate::search::UnknownMode| AppError::BadRequest(e.to_string()))?;

    let cache_key = format!("{}|{}", mode, query);
    if let Some(cached) = state.map_cache.get(&cache_key).await {
        return Ok(Html(cached));
    }

    let matched = search(&state.dataset.plants, parsed, &query);
    let points = aggregate(&matched, &state.index);
    tracing::debug!(mode = %mode, query = %query, plants = matched.len(), provinces = points.len(), "query served");

    let mut view = MapView::vietnam().with_heatmap(&points, HeatmapOptions::default());
    if let Some(boundary) = &state.dataset.boundary {
        view = view.with_outline(boundary, OutlineStyle::default());
    }

    let html = view
        .render()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state.map_cache.insert(cache_key, html.clone()).await;

    Ok(Html(html))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "plants": state.dataset.plants.len(),
        "provinces": state.index.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn render_html<T: Template>(template: T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(e.to_string()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
