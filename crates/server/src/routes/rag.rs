use actix_web::{get, post, web, HttpResponse};
use std::sync::Arc;
use symbiosis_common::SymbiosisError;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{
    require, AddChunkRequest, AskTopicRequest, ChunkSummary, SearchQuery, SearchResponse,
    SearchResultItem, TopicSummary,
};

/// Embed and store a text chunk
#[post("/rag/add")]
pub async fn add_chunk(
    req: web::Json<AddChunkRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();
    let text = require(req.text, "text")?;

    let outcome = state.vector_search.add_text(req.id, &text).await?;

    let verb = if outcome.replaced { "Updated" } else { "Added" };
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("{} chunk: {}", verb, outcome.id)))
}

/// Classify a question into one of the known topics
///
/// The body is the raw question; a JSON string literal is unquoted first.
#[post("/rag/find-topic")]
pub async fn find_topic(body: String, state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let question = serde_json::from_str::<String>(&body).unwrap_or(body);
    if question.trim().is_empty() {
        return Err(SymbiosisError::invalid_input("question cannot be empty").into());
    }

    let scope = state.request_scope();
    // Dropping the handler (client disconnect) cancels the generation call
    let _cancel_on_drop = scope.cancel.clone().drop_guard();

    let topic = if state.config.strict_topics {
        state.rag.classify_topic_strict(&question, &scope).await?
    } else {
        state.rag.classify_topic(&question, &scope).await?
    };

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(topic))
}

/// Answer a question from a topic's references
#[post("/rag/ask-topic")]
pub async fn ask_topic(
    req: web::Json<AskTopicRequest>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();
    let topic = require(req.topic, "topic")?;
    let question = require(req.question, "question")?;

    info!("Answering question in topic '{}'", topic);

    let scope = state.request_scope();
    let _cancel_on_drop = scope.cancel.clone().drop_guard();

    let answer = state.rag.answer_in_topic(&topic, &question, &scope).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(answer))
}

/// Rank stored chunks against a query text
#[get("/rag/search")]
pub async fn search(
    query: web::Query<SearchQuery>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    if query.q.trim().is_empty() {
        return Err(SymbiosisError::invalid_input("Query cannot be empty").into());
    }

    let top_k = usize::try_from(query.top_k.max(0)).unwrap_or(usize::MAX);
    let results: Vec<SearchResultItem> = state
        .vector_search
        .search(&query.q, top_k)
        .await?
        .into_iter()
        .map(|r| SearchResultItem {
            id: r.chunk.id,
            text: r.chunk.text,
            score: r.score,
        })
        .collect();

    Ok(HttpResponse::Ok().json(SearchResponse {
        query: query.q.clone(),
        count: results.len(),
        results,
    }))
}

/// List stored chunks in insertion order
#[get("/rag/chunks")]
pub async fn list_chunks(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let chunks: Vec<ChunkSummary> = state
        .vector_search
        .all_chunks()
        .await
        .into_iter()
        .map(|c| ChunkSummary { id: c.id, text: c.text })
        .collect();

    Ok(HttpResponse::Ok().json(chunks))
}

/// List known topics
#[get("/rag/topics")]
pub async fn list_topics(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let topics: Vec<TopicSummary> = state
        .rag
        .topics()
        .entries()
        .into_iter()
        .map(|entry| TopicSummary {
            topic: entry.topic,
            reference_count: entry.reference_ids.len(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(topics))
}
