//! Serve a generated document over HTTP.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use crate::openapi::Document;

/// Route the document is served on.
pub const DOCS_PATH: &str = "/swagger.json";

/// Router serving `document` as JSON at [`DOCS_PATH`].
pub fn router(document: Document) -> Router {
    Router::new()
        .route(DOCS_PATH, get(swagger_json))
        .with_state(Arc::new(document))
}

/// Return the generated document.
pub async fn swagger_json(State(document): State<Arc<Document>>) -> Json<Document> {
    Json(document.as_ref().clone())
}
