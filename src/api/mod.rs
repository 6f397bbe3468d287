pub mod admin;
pub mod applications;
pub mod health;
pub mod holdings;
pub mod ipos;

use crate::desk::IpoDesk;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<IpoDesk>,
}

impl AppState {
    pub fn new(desk: Arc<IpoDesk>) -> Self {
        Self { desk }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/ipos", get(ipos::get_ipos))
        .route(
            "/v1/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route("/v1/applications/:id", get(applications::get_application))
        .route(
            "/v1/applications/:id/withdraw",
            post(applications::withdraw_application),
        )
        .route("/v1/holdings", get(holdings::get_holdings))
        .route("/v1/admin/reset", post(admin::reset_pool))
        .layer(cors)
        .with_state(state)
}
