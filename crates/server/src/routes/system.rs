use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::HealthResponse;

#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let stats = state.vector_search.stats().await;

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        started_at: state.started_at,
        chunks: stats.chunk_count,
        topics: state.rag.topics().len(),
        articles: state.coords.len(),
        model: state.rag.model_name().to_string(),
    }))
}
