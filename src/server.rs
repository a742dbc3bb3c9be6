// src/server.rs
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::pipeline::ExtractionPipeline;
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn build_router(pipeline: Arc<ExtractionPipeline>) -> Router {
    Router::new()
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

/// POST /extract. Short pages get the error-shaped body with a 200;
/// model failures get a 502.
async fn extract_handler(
    State(pipeline): State<Arc<ExtractionPipeline>>,
    Json(request): Json<UrlRequest>,
) -> Response {
    tracing::info!("Extract request for {}", request.url);
    match pipeline.run(&request.url).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => {
            tracing::error!("Analysis failed for {}: {}", request.url, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn serve(addr: SocketAddr, pipeline: Arc<ExtractionPipeline>) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Extract endpoint: POST http://{}/extract", addr);

    axum::serve(listener, build_router(pipeline))
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}
