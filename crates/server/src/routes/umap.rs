use actix_web::{get, web, HttpResponse};
use std::sync::Arc;
use symbiosis_common::SymbiosisError;

use crate::error::ApiResult;
use crate::state::AppState;

#[get("/umap/coords/{id}")]
pub async fn get_coords(
    id: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    match state.coords.get(id.as_str()) {
        Some(coords) => Ok(HttpResponse::Ok().json(coords)),
        None => Err(SymbiosisError::not_found(format!("article {}", id.as_str())).into()),
    }
}

#[get("/umap/articles")]
pub async fn list_articles(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.coords.all()))
}
