//! # Catalog Display Rows
//!
//! Joins cars against their separately fetched lookup lists into the flat
//! rows the catalog cards render.
//!
//! Each catalog page issues independent reads for cars, types, capacities,
//! prices and the viewer's favorites, then derives display rows once all of
//! them have resolved. The joins are linear scans; the lookup lists hold a
//! handful of rows each.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Car, CarCapacity, CarPrice, CarType};

/// Fallback type label when a car's type reference does not resolve.
const UNKNOWN_TYPE: &str = "Unknown Type";

/// A flat catalog row with every lookup reference resolved to its display
/// value and the viewer's favorite state merged in.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CarDisplayRow {
    pub id: String,
    pub title: String,
    pub type_name: String,
    pub image_url: String,
    pub gasoline: f64,
    pub steering: String,
    pub capacity: f64,
    pub price: f64,
    pub is_liked: bool,
}

/// Builds display rows for a list of cars.
///
/// Missing type references fall back to "Unknown Type"; missing or
/// non-numeric capacity and price values fall back to 0. `favorite_ids`
/// is the id set of the viewer's liked cars; an anonymous viewer passes
/// an empty slice and every row comes back unliked.
pub fn build_display_rows(
    cars: &[Car],
    types: &[CarType],
    capacities: &[CarCapacity],
    prices: &[CarPrice],
    favorite_ids: &[String],
) -> Vec<CarDisplayRow> {
    cars.iter()
        .map(|car| {
            let type_name = types
                .iter()
                .find(|t| t.id == car.type_id)
                .map(|t| t.car_type.clone())
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

            let capacity = capacities
                .iter()
                .find(|c| c.id == car.capacity_id)
                .map(|c| c.capacity.as_number())
                .unwrap_or(0.0);

            let price = prices
                .iter()
                .find(|p| p.id == car.price_id)
                .map(|p| p.price.as_number())
                .unwrap_or(0.0);

            let is_liked = favorite_ids.iter().any(|id| *id == car.id);

            CarDisplayRow {
                id: car.id.clone(),
                title: car.title.clone(),
                type_name,
                image_url: car.image_url.clone(),
                gasoline: car.gasoline,
                steering: car.steering.clone(),
                capacity,
                price,
                is_liked,
            }
        })
        .collect()
}
