//! # Review Handlers
//!
//! Review submission and listing for a car. The empty-text check runs
//! here, before the ledger is touched.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::favorites::SuccessResponse;
use crate::AppState;
use rentora_core::validation::validate_review_text;
use rentora_core::Review;

/// Review submission body.
#[derive(Debug, Clone, Deserialize)]
pub struct AddReviewRequest {
    pub review: String,
}

/// Review DTO for the detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    pub review: String,
    pub created_at: String,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        ReviewDto {
            id: r.id,
            user_id: r.user_id,
            car_id: r.car_id,
            review: r.review,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars/{id}/reviews", post(add_review))
        .route("/cars/{id}/reviews", get(get_reviews_by_id))
}

/// Appends a review to a car and bumps its counter.
async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(car_id): Path<String>,
    Json(body): Json<AddReviewRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    validate_review_text(&body.review).map_err(rentora_core::CoreError::from)?;

    state
        .db
        .reviews()
        .add(&user.user_id, &car_id, &body.review)
        .await?;

    info!(user_id = %user.user_id, car_id = %car_id, "Review added");
    Ok(Json(SuccessResponse { success: true }))
}

/// Lists a car's reviews in insertion order.
async fn get_reviews_by_id(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let reviews = state.db.reviews().list_by_car(&car_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewDto::from).collect()))
}
