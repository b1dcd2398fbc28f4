//! # Catalog Handlers
//!
//! Read endpoints for cars, the lookup tables and the city list.
//!
//! ## Detail Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  GET /api/cars/{id}                                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  resolve_car: car → type → capacity → price                        │
//! │       │                                                             │
//! │       ├── any reference missing → 404 (first miss wins)            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  { car, carType, carCapacity, carPrice }                           │
//! │                                                                     │
//! │  The detail page never renders from a partial tuple.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::error::ApiError;
use crate::AppState;
use rentora_core::display::{build_display_rows, CarDisplayRow};
use rentora_core::{Car, LookupValue, ResolvedCar};

// =============================================================================
// DTOs
// =============================================================================

/// Car DTO (Data Transfer Object) for the frontend.
///
/// ## Why DTO?
/// - Decouples the internal domain model from the API contract
/// - Handles serde rename to camelCase for JS consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_id: String,
    pub image_url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_image_url_one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interior_image_url_two: Option<String>,
    pub gasoline: f64,
    pub steering: String,
    pub capacity: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<i64>,
}

impl From<Car> for CarDto {
    fn from(c: Car) -> Self {
        CarDto {
            id: c.id,
            title: c.title,
            type_id: c.type_id,
            image_url: c.image_url,
            description: c.description,
            interior_image_url_one: c.interior_image_url_one,
            interior_image_url_two: c.interior_image_url_two,
            gasoline: c.gasoline,
            steering: c.steering,
            capacity: c.capacity_id,
            price: c.price_id,
            stars: c.stars,
            reviews: c.reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarTypeDto {
    pub id: String,
    #[serde(rename = "type")]
    pub car_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarCapacityDto {
    pub id: String,
    pub capacity: LookupValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPriceDto {
    pub id: String,
    pub price: LookupValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub id: String,
    pub city: String,
}

/// Response shape of the detail endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCarDto {
    pub car: CarDto,
    pub car_type: CarTypeDto,
    pub car_capacity: CarCapacityDto,
    pub car_price: CarPriceDto,
}

impl From<ResolvedCar> for ResolvedCarDto {
    fn from(r: ResolvedCar) -> Self {
        ResolvedCarDto {
            car: CarDto::from(r.car),
            car_type: CarTypeDto {
                id: r.car_type.id,
                car_type: r.car_type.car_type,
            },
            car_capacity: CarCapacityDto {
                id: r.car_capacity.id,
                capacity: r.car_capacity.capacity,
            },
            car_price: CarPriceDto {
                id: r.car_price.id,
                price: r.car_price.price,
            },
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(get_all))
        .route("/cars/search", get(search))
        .route("/cars/listing", get(listing))
        .route("/cars/{id}", get(get_by_id))
        .route("/car-types", get(get_all_types))
        .route("/car-capacities", get(get_all_capacities))
        .route("/car-prices", get(get_all_prices))
        .route("/cities", get(get_cities))
}

/// Lists every car in the catalog.
async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<CarDto>>, ApiError> {
    let cars = state.db.catalog().list_cars().await?;
    Ok(Json(cars.into_iter().map(CarDto::from).collect()))
}

/// Lists every car newest-first for the search palette. Requires identity.
async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<CarDto>>, ApiError> {
    let cars = state.db.catalog().search_cars().await?;
    Ok(Json(cars.into_iter().map(CarDto::from).collect()))
}

/// Returns flat display rows with lookups joined and the caller's
/// favorites merged in. Anonymous callers get every row unliked.
async fn listing(
    State(state): State<AppState>,
    user: MaybeAuthUser,
) -> Result<Json<Vec<CarDisplayRow>>, ApiError> {
    let catalog = state.db.catalog();

    let cars = catalog.list_cars().await?;
    let types = catalog.list_types().await?;
    let capacities = catalog.list_capacities().await?;
    let prices = catalog.list_prices().await?;

    let favorite_ids: Vec<String> = match user.0 {
        Some(user) => state
            .db
            .favorites()
            .list(&user.user_id)
            .await?
            .into_iter()
            .map(|liked| liked.car_id)
            .collect(),
        None => Vec::new(),
    };

    debug!(cars = cars.len(), favorites = favorite_ids.len(), "Building listing");

    Ok(Json(build_display_rows(
        &cars,
        &types,
        &capacities,
        &prices,
        &favorite_ids,
    )))
}

/// Gets one car with all three lookup references resolved.
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResolvedCarDto>, ApiError> {
    let resolved = state.db.catalog().resolve_car(&id).await?;
    Ok(Json(ResolvedCarDto::from(resolved)))
}

/// Lists the car type lookup table.
async fn get_all_types(State(state): State<AppState>) -> Result<Json<Vec<CarTypeDto>>, ApiError> {
    let types = state.db.catalog().list_types().await?;
    Ok(Json(
        types
            .into_iter()
            .map(|t| CarTypeDto {
                id: t.id,
                car_type: t.car_type,
            })
            .collect(),
    ))
}

/// Lists the capacity lookup table.
async fn get_all_capacities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarCapacityDto>>, ApiError> {
    let capacities = state.db.catalog().list_capacities().await?;
    Ok(Json(
        capacities
            .into_iter()
            .map(|c| CarCapacityDto {
                id: c.id,
                capacity: c.capacity,
            })
            .collect(),
    ))
}

/// Lists the price lookup table.
async fn get_all_prices(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarPriceDto>>, ApiError> {
    let prices = state.db.catalog().list_prices().await?;
    Ok(Json(
        prices
            .into_iter()
            .map(|p| CarPriceDto {
                id: p.id,
                price: p.price,
            })
            .collect(),
    ))
}

/// Lists the available cities. An empty city table is an error; the
/// checkout form cannot render without locations to offer.
async fn get_cities(State(state): State<AppState>) -> Result<Json<Vec<CityDto>>, ApiError> {
    let cities = state.db.catalog().list_cities().await?;

    if cities.is_empty() {
        return Err(ApiError::not_found("Cities", "none available"));
    }

    Ok(Json(
        cities
            .into_iter()
            .map(|c| CityDto {
                id: c.id,
                city: c.city,
            })
            .collect(),
    ))
}
