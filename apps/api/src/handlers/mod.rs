//! Request handlers, one module per ledger.

pub mod catalog;
pub mod favorites;
pub mod health;
pub mod rentals;
pub mod reviews;

use axum::Router;

use crate::AppState;

/// Assembles every /api route.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(favorites::router())
        .merge(reviews::router())
        .merge(rentals::router())
}
