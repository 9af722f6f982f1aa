pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::bank::handlers as bank_handlers;
use crate::scoring::handlers as scoring_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Question banks
        .route(
            "/api/v1/industries",
            get(bank_handlers::handle_list_industries),
        )
        .route(
            "/api/v1/questions/:industry",
            get(bank_handlers::handle_get_questions),
        )
        .route(
            "/api/v1/questions/:industry/pillars/:pillar/recommendations/:status",
            get(bank_handlers::handle_get_recommendations),
        )
        // Assessments
        .route(
            "/api/v1/assessments/score",
            post(scoring_handlers::handle_score_assessment),
        )
        .with_state(state)
}
