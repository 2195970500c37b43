//! Axum router: maps every page and action to its handler.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    analytics::analytics_page,
    claims::{add_claim, claims_page},
    dashboard::dashboard,
    influencer_detail::influencer_detail,
    influencers::{add_influencer, influencers_page, scan_influencer},
    research::{
        analyze_claim, analyze_podcast, batch_process, research_page, save_config,
        validate_journals,
    },
    system::health,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                      get(dashboard))
        .route("/influencers",           get(influencers_page).post(add_influencer))
        .route("/influencers/{id}",      get(influencer_detail))
        .route("/influencers/{id}/scan", post(scan_influencer))
        .route("/claims",                get(claims_page).post(add_claim))
        .route("/analytics",             get(analytics_page))
        .route("/research",              get(research_page).post(save_config))

        // Research tools
        .route("/research/analyze",      post(analyze_claim))
        .route("/research/podcast",      post(analyze_podcast))
        .route("/research/journals",     post(validate_journals))
        .route("/research/batch",        post(batch_process))

        .route("/health",                get(health))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
