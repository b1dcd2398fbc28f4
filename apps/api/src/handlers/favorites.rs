//! # Favorites Handlers
//!
//! The favorites ledger endpoints. Add and remove require identity; the
//! list degrades to empty for anonymous callers so the catalog page can
//! always render hearts.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::error::ApiError;
use crate::handlers::catalog::CarDto;
use crate::AppState;

/// Mutation acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// A favorite car: the car fields plus the liked flag the card renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCarDto {
    #[serde(flatten)]
    pub car: CarDto,
    pub is_liked: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(get_favorites))
        .route("/favorites/{car_id}", post(add_to_favorites))
        .route("/favorites/{car_id}", delete(remove_from_favorites))
}

/// Adds a car to the caller's favorites.
///
/// Fails with 409 when the car is already a favorite. The car id itself
/// is not verified.
async fn add_to_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Path(car_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db.favorites().add(&user.user_id, &car_id).await?;

    info!(user_id = %user.user_id, car_id = %car_id, "Favorite added");
    Ok(Json(SuccessResponse { success: true }))
}

/// Removes a car from the caller's favorites.
///
/// Fails with 404 when the car is not a favorite.
async fn remove_from_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Path(car_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.db.favorites().remove(&user.user_id, &car_id).await?;

    info!(user_id = %user.user_id, car_id = %car_id, "Favorite removed");
    Ok(Json(SuccessResponse { success: true }))
}

/// Lists the caller's favorite cars. Anonymous callers receive an empty
/// list, not an error.
async fn get_favorites(
    State(state): State<AppState>,
    user: MaybeAuthUser,
) -> Result<Json<Vec<FavoriteCarDto>>, ApiError> {
    let user = match user.0 {
        Some(user) => user,
        None => return Ok(Json(Vec::new())),
    };

    let cars = state.db.favorites().list_cars(&user.user_id).await?;

    Ok(Json(
        cars.into_iter()
            .map(|car| FavoriteCarDto {
                car: CarDto::from(car),
                is_liked: true,
            })
            .collect(),
    ))
}
