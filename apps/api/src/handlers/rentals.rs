//! # Rental Handlers
//!
//! The checkout submission endpoint.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  POST /api/rentals (auth)                                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Load the city list (locations must come from it)                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CheckoutForm::submit                                              │
//! │  ├── billing fields validated                                      │
//! │  ├── dates serialized to "D-M-YYYY"                                │
//! │  └── card number/expiration reformatted                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  rentals().create — one unconditional insert                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  { "rentalOrder": "<order id>" }                                   │
//! │                                                                     │
//! │  The car reference and the schedule are stored as submitted;       │
//! │  no existence or overlap check runs on them.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use rentora_core::checkout::CheckoutForm;

/// Checkout submission body: the car plus the full form state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalOrderRequest {
    pub car_id: String,
    #[serde(flatten)]
    pub form: CheckoutForm,
}

/// Checkout response: the id of the created order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalOrderResponse {
    pub rental_order: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/rentals", post(create_rental_order))
}

/// Validates the checkout form and persists the order in one insert.
async fn create_rental_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateRentalOrderRequest>,
) -> Result<Json<CreateRentalOrderResponse>, ApiError> {
    let cities = state.db.catalog().list_cities().await?;

    let draft = body.form.submit(&cities)?;

    let order = state
        .db
        .rentals()
        .create(
            &user.user_id,
            &body.car_id,
            &draft.billing_info,
            &draft.rental_info,
            &draft.payment_method,
        )
        .await?;

    info!(order_id = %order.id, user_id = %user.user_id, "Rental request received");

    Ok(Json(CreateRentalOrderResponse {
        rental_order: order.id,
    }))
}
