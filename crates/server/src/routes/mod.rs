pub mod rag;
pub mod system;
pub mod umap;

use actix_web::web;

/// Register every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(rag::add_chunk)
        .service(rag::find_topic)
        .service(rag::ask_topic)
        .service(rag::search)
        .service(rag::list_chunks)
        .service(rag::list_topics)
        .service(umap::get_coords)
        .service(umap::list_articles)
        .service(system::health);
}
