//! HTTP query service
//!
//! # Endpoints
//!
//! - `GET /route?from=..&to=..` - Risk-weighted route between two cities
//! - `GET /cities` - Known cities with coordinates
//! - `GET /health` - Health check with graph size
//!
//! The planner (and the graph inside it) is built once and shared read-only
//! across requests.

use crate::core::{City, Error};
use crate::planner::{RoutePlanner, RouteReport};
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the Axum router
pub fn build_router(planner: Arc<RoutePlanner>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/route", get(route))
        .route("/cities", get(cities))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(planner)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(planner: RoutePlanner, addr: SocketAddr) -> Result<()> {
    let planner = Arc::new(planner);
    info!(
        cities = planner.graph().node_count(),
        roads = planner.graph().edge_count(),
        "starting query server"
    );

    let app = build_router(planner);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

// ============ Route Endpoint ============

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    from: String,
    to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

fn error_response(planner: &RoutePlanner, err: Error) -> Response {
    let (status, suggestion) = match &err {
        Error::NodeNotFound(name) => (StatusCode::NOT_FOUND, planner.suggest(name)),
        Error::SameEndpoints(_) | Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, None),
        Error::NoPathExists { .. } => (StatusCode::UNPROCESSABLE_ENTITY, None),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, None),
    };
    let body = ErrorResponse {
        error: err.to_string(),
        suggestion,
    };
    (status, Json(body)).into_response()
}

async fn route(
    State(planner): State<Arc<RoutePlanner>>,
    Query(req): Query<RouteRequest>,
) -> Response {
    match planner.plan(&req.from, &req.to) {
        Ok(report) => Json::<RouteReport>(report).into_response(),
        Err(err) => error_response(&planner, err),
    }
}

// ============ Cities Endpoint ============

async fn cities(State(planner): State<Arc<RoutePlanner>>) -> Json<Vec<City>> {
    Json(planner.network().cities.clone())
}

// ============ Health Endpoint ============

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub nodes: usize,
    pub edges: usize,
}

async fn health(State(planner): State<Arc<RoutePlanner>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        nodes: planner.graph().node_count(),
        edges: planner.graph().edge_count(),
    })
}
