use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", get(handlers::generate))
        .route("/feedback", post(handlers::feedback))
        .route("/upload", post(handlers::upload))
        .route("/uploads/:filename", get(handlers::serve_upload))
        .route("/liked_palettes", get(handlers::liked_palettes))
        .route("/generate_harmony", post(handlers::generate_harmony))
        .with_state(state)
}
