//! HTTP API Layer
//!
//! This crate exposes the claim settlement network over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One module per service surface (customers, claims, pool, repairs)
//! - **Middleware**: Bearer-token authentication and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Protocol errors mapped onto HTTP status codes
//!
//! Every protected request acts as the identity named in its token's `sub`
//! claim. The services decide what that identity may do.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(network, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use claims_network::ClaimsNetwork;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{claims, customers, health, pool, repairs};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub network: Arc<ClaimsNetwork>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `network` - The deployed settlement network
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(network: Arc<ClaimsNetwork>, config: ApiConfig) -> Router {
    let state = AppState { network, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/", post(customers::add_customer))
        .route("/:identity", get(customers::get_customer))
        .route("/:identity/deactivate", post(customers::deactivate_customer));

    let claims_routes = Router::new()
        .route("/third-party", post(claims::submit_third_party))
        .route("/all-risk", post(claims::submit_all_risk))
        .route("/:id", get(claims::get_claim))
        .route("/:id/pay-third-party", post(claims::pay_third_party))
        .route("/:id/pay-garage", post(claims::pay_garage));

    let pool_routes = Router::new()
        .route("/", get(pool::get_pool))
        .route("/deposits", post(pool::deposit));

    let repair_routes = Router::new()
        .route("/:id", get(repairs::get_repair))
        .route("/:id/complete", post(repairs::complete_repair));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/claims", claims_routes)
        .nest("/pool", pool_routes)
        .nest("/repairs", repair_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
