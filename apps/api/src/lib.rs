//! # Rentora API
//!
//! The HTTP surface of the marketplace: catalog reads, the favorites and
//! review ledgers, and rental order creation.
//!
//! ## Route Map
//! ```text
//! GET    /health                     liveness + database check
//! GET    /api/cars                   all cars
//! GET    /api/cars/search            all cars, newest first (auth)
//! GET    /api/cars/listing           display rows with lookups joined
//! GET    /api/cars/{id}              resolved car detail
//! GET    /api/cars/{id}/reviews      reviews for a car
//! POST   /api/cars/{id}/reviews      add a review (auth)
//! GET    /api/car-types              type lookup table
//! GET    /api/car-capacities         capacity lookup table
//! GET    /api/car-prices             price lookup table
//! GET    /api/cities                 available cities
//! GET    /api/favorites              caller's favorite cars (empty if anonymous)
//! POST   /api/favorites/{car_id}     add favorite (auth)
//! DELETE /api/favorites/{car_id}     remove favorite (auth)
//! POST   /api/rentals                submit a rental checkout (auth)
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::auth::TokenManager;
use rentora_db::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenManager,
}

impl AppState {
    /// Creates application state from an open database and a JWT secret.
    pub fn new(db: Database, jwt_secret: impl Into<String>) -> Self {
        AppState {
            db,
            tokens: TokenManager::new(jwt_secret),
        }
    }
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::health::router())
        .nest("/api", handlers::api_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
