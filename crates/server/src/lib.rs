//! Symbiosis HTTP Server
//!
//! Actix-web REST API for chunk ingestion, topic-scoped RAG and article
//! coordinates

pub mod coords;
pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use symbiosis_common::{AppConfig, Result, SymbiosisError};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::error::ApiError;
use crate::state::AppState;

pub use coords::{ArticleCoords, CoordinateIndex};

/// Shared state, extractor configs and routes
pub fn configure_app(state: Arc<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError(SymbiosisError::invalid_input(err.to_string())).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError(SymbiosisError::invalid_input(err.to_string())).into()
            }));
        routes::configure(cfg);
    }
}

/// Load state and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Starting server on {} ({} topics, {} articles, model {})",
        bind_addr,
        state.rag.topics().len(),
        state.coords.len(),
        state.rag.model_name()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure_app(Arc::clone(&state)))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use async_trait::async_trait;
    use symbiosis_common::GenerationError;
    use symbiosis_llm::TextGenerator;
    use symbiosis_rag::TopicIndex;

    /// Replies with the prompt it was given
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
            Ok(prompt.to_string())
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            Ok(self.0.to_string())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingGenerator(u16);

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            Err(GenerationError::Status {
                status: self.0,
                body: "{\"error\":\"internal\"}".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn state_with(generator: Arc<dyn TextGenerator>, strict_topics: bool) -> Arc<AppState> {
        let config = AppConfig {
            strict_topics,
            ..AppConfig::default()
        };
        let topics = TopicIndex::from_entries([
            ("Space Biology", vec!["4136787"]),
            ("Microbiology", vec!["111", "222"]),
        ]);
        let coords = CoordinateIndex::from_articles([ArticleCoords {
            id: "4136787".to_string(),
            title: "Mice in orbit".to_string(),
            x: 0.5,
            y: -1.0,
            z: 2.0,
        }]);

        Arc::new(AppState::from_parts(config, generator, topics, coords).unwrap())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().configure(configure_app($state))).await
        };
    }

    #[actix_web::test]
    async fn test_add_chunk_assigns_ids() {
        let state = state_with(Arc::new(EchoGenerator), true);
        let app = app!(Arc::clone(&state));

        let req = test::TestRequest::post()
            .uri("/rag/add")
            .set_json(serde_json::json!({"id": "abc", "text": "Spaceflight alters gene expression"}))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Added chunk: abc");

        let req = test::TestRequest::post()
            .uri("/rag/add")
            .set_json(serde_json::json!({"text": "Plants orient roots without gravity"}))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.starts_with("Added chunk: "));
        assert_eq!(body.len(), "Added chunk: ".len() + 36);

        let req = test::TestRequest::post()
            .uri("/rag/add")
            .set_json(serde_json::json!({"id": "abc", "text": "Revised passage"}))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Updated chunk: abc");

        assert_eq!(state.vector_search.stats().await.chunk_count, 2);
    }

    #[actix_web::test]
    async fn test_add_chunk_requires_text() {
        let app = app!(state_with(Arc::new(EchoGenerator), true));

        let req = test::TestRequest::post()
            .uri("/rag/add")
            .set_json(serde_json::json!({"id": "abc"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = test::read_body_json(resp).await;
        assert!(error.error.contains("'text'"));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app!(state_with(Arc::new(EchoGenerator), true));

        let req = test::TestRequest::post()
            .uri("/rag/ask-topic")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_ask_topic_builds_reference_context() {
        let app = app!(state_with(Arc::new(EchoGenerator), true));

        let req = test::TestRequest::post()
            .uri("/rag/ask-topic")
            .set_json(serde_json::json!({"topic": "Space Biology", "question": "what is known?"}))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let prompt = std::str::from_utf8(&body).unwrap();

        assert!(prompt.contains("https://pmc.ncbi.nlm.nih.gov/articles/PMC4136787/"));
        assert!(prompt.ends_with("Answer to: what is known?"));
    }

    #[actix_web::test]
    async fn test_ask_topic_upstream_failure() {
        let app = app!(state_with(Arc::new(FailingGenerator(500)), true));

        let req = test::TestRequest::post()
            .uri("/rag/ask-topic")
            .set_json(serde_json::json!({"topic": "Space Biology", "question": "what is known?"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.upstream_status, Some(500));
    }

    #[actix_web::test]
    async fn test_find_topic_accepts_json_string_body() {
        let app = app!(state_with(Arc::new(FixedGenerator("microbiology.")), true));

        let req = test::TestRequest::post()
            .uri("/rag/find-topic")
            .insert_header(("content-type", "application/json"))
            .set_payload("\"Which bacteria survive on the ISS?\"")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Microbiology");
    }

    #[actix_web::test]
    async fn test_find_topic_strict_rejects_unknown() {
        let app = app!(state_with(Arc::new(FixedGenerator("Geology")), true));

        let req = test::TestRequest::post()
            .uri("/rag/find-topic")
            .set_payload("rocks?")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_find_topic_raw_when_not_strict() {
        let app = app!(state_with(Arc::new(FixedGenerator("Geology")), false));

        let req = test::TestRequest::post()
            .uri("/rag/find-topic")
            .set_payload("rocks?")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Geology");
    }

    #[actix_web::test]
    async fn test_search_and_list_chunks() {
        let app = app!(state_with(Arc::new(EchoGenerator), true));

        for (id, text) in [("1", "cosmic rays"), ("2", "bone loss"), ("3", "plant roots")] {
            let req = test::TestRequest::post()
                .uri("/rag/add")
                .set_json(serde_json::json!({"id": id, "text": text}))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/rag/search?q=bone%20loss&top_k=2")
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["count"], 2);
        assert_eq!(resp["results"][0]["id"], "2");

        let req = test::TestRequest::get()
            .uri("/rag/search?q=bone%20loss&top_k=-1")
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["count"], 0);

        let req = test::TestRequest::get().uri("/rag/chunks").to_request();
        let chunks: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<_> = chunks
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[actix_web::test]
    async fn test_coords_lookup() {
        let app = app!(state_with(Arc::new(EchoGenerator), true));

        let req = test::TestRequest::get().uri("/umap/coords/4136787").to_request();
        let coords: ArticleCoords = test::call_and_read_body_json(&app, req).await;
        assert_eq!(coords.title, "Mice in orbit");
        assert_eq!(coords.z, 2.0);

        let req = test::TestRequest::get().uri("/umap/coords/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/umap/articles").to_request();
        let all: Vec<ArticleCoords> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 1);
    }

    #[actix_web::test]
    async fn test_topics_and_health() {
        let app = app!(state_with(Arc::new(EchoGenerator), true));

        let req = test::TestRequest::get().uri("/rag/topics").to_request();
        let topics: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(topics[0]["topic"], "Microbiology");
        assert_eq!(topics[0]["reference_count"], 2);

        let req = test::TestRequest::get().uri("/health").to_request();
        let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["topics"], 2);
        assert_eq!(health["articles"], 1);
        assert_eq!(health["model"], "echo");
    }
}
