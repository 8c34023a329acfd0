pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai;
use crate::render;
use crate::state::AppState;
use crate::storage;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume records
        .route(
            "/api/v1/resumes",
            get(storage::handlers::handle_list_resumes).post(storage::handlers::handle_save_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(storage::handlers::handle_get_resume)
                .delete(storage::handlers::handle_delete_resume),
        )
        // Rendering
        .route(
            "/api/v1/resumes/:id/pdf",
            post(render::handlers::handle_render_pdf),
        )
        // Suggestions
        .route(
            "/api/v1/ai/summary",
            post(ai::handlers::handle_suggest_summary),
        )
        .route(
            "/api/v1/ai/enhance",
            post(ai::handlers::handle_enhance_experience),
        )
        .with_state(state)
}
