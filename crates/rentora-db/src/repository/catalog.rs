//! # Catalog Repository
//!
//! Database operations for cars, their lookup tables and the city list.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How resolve_car Works                                │
//! │                                                                         │
//! │  resolve_car(id)                                                       │
//! │       │                                                                 │
//! │       ├── cars           missing? → NotFound("Car")                    │
//! │       ├── car_types      missing? → NotFound("CarType")                │
//! │       ├── car_capacities missing? → NotFound("CarCapacity")            │
//! │       └── car_prices     missing? → NotFound("CarPrice")               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ResolvedCar { car, car_type, car_capacity, car_price }                │
//! │                                                                         │
//! │  Each reference is checked independently, in that order, stopping      │
//! │  at the first missing row. A partial tuple is never returned.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No server-side filtering or pagination; the catalog is small and the
//! clients filter the full list themselves.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentora_core::{AvailableCity, Car, CarCapacity, CarPrice, CarType, LookupValue, ResolvedCar};

// =============================================================================
// Row Records
// =============================================================================
// Thin FromRow structs mirroring the table layout; converted into the
// domain types before leaving the repository.

#[derive(Debug, sqlx::FromRow)]
struct CarRecord {
    id: String,
    title: String,
    type_id: String,
    image_url: String,
    description: String,
    interior_image_url_one: Option<String>,
    interior_image_url_two: Option<String>,
    gasoline: f64,
    steering: String,
    capacity_id: String,
    price_id: String,
    stars: Option<f64>,
    reviews: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<CarRecord> for Car {
    fn from(r: CarRecord) -> Self {
        Car {
            id: r.id,
            title: r.title,
            type_id: r.type_id,
            image_url: r.image_url,
            description: r.description,
            interior_image_url_one: r.interior_image_url_one,
            interior_image_url_two: r.interior_image_url_two,
            gasoline: r.gasoline,
            steering: r.steering,
            capacity_id: r.capacity_id,
            price_id: r.price_id,
            stars: r.stars,
            reviews: r.reviews,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LookupRecord {
    id: String,
    value: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog reads and seeding inserts.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Cars
    // -------------------------------------------------------------------------

    /// Lists all cars in insertion order.
    pub async fn list_cars(&self) -> DbResult<Vec<Car>> {
        let records = sqlx::query_as::<_, CarRecord>(
            r#"
            SELECT id, title, type_id, image_url, description,
                   interior_image_url_one, interior_image_url_two,
                   gasoline, steering, capacity_id, price_id,
                   stars, reviews, created_at
            FROM cars
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Listed cars");
        Ok(records.into_iter().map(Car::from).collect())
    }

    /// Lists all cars newest-first, the order the search palette shows.
    pub async fn search_cars(&self) -> DbResult<Vec<Car>> {
        let records = sqlx::query_as::<_, CarRecord>(
            r#"
            SELECT id, title, type_id, image_url, description,
                   interior_image_url_one, interior_image_url_two,
                   gasoline, steering, capacity_id, price_id,
                   stars, reviews, created_at
            FROM cars
            ORDER BY rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Car::from).collect())
    }

    /// Gets a car by its ID.
    pub async fn get_car(&self, id: &str) -> DbResult<Option<Car>> {
        let record = sqlx::query_as::<_, CarRecord>(
            r#"
            SELECT id, title, type_id, image_url, description,
                   interior_image_url_one, interior_image_url_two,
                   gasoline, steering, capacity_id, price_id,
                   stars, reviews, created_at
            FROM cars
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Car::from))
    }

    /// Resolves a car and all three of its lookup references.
    ///
    /// Fails with NotFound for the first reference that does not resolve;
    /// the checks run in car, type, capacity, price order.
    pub async fn resolve_car(&self, id: &str) -> DbResult<ResolvedCar> {
        let car = self
            .get_car(id)
            .await?
            .ok_or_else(|| DbError::not_found("Car", id))?;

        let car_type = self
            .get_type(&car.type_id)
            .await?
            .ok_or_else(|| DbError::not_found("CarType", &car.type_id))?;

        let car_capacity = self
            .get_capacity(&car.capacity_id)
            .await?
            .ok_or_else(|| DbError::not_found("CarCapacity", &car.capacity_id))?;

        let car_price = self
            .get_price(&car.price_id)
            .await?
            .ok_or_else(|| DbError::not_found("CarPrice", &car.price_id))?;

        Ok(ResolvedCar {
            car,
            car_type,
            car_capacity,
            car_price,
        })
    }

    /// Inserts a car. The id is expected to be generated beforehand and
    /// the three lookup references must exist (enforced by the schema).
    pub async fn insert_car(&self, car: &Car) -> DbResult<()> {
        debug!(title = %car.title, "Inserting car");

        sqlx::query(
            r#"
            INSERT INTO cars (
                id, title, type_id, image_url, description,
                interior_image_url_one, interior_image_url_two,
                gasoline, steering, capacity_id, price_id,
                stars, reviews, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&car.id)
        .bind(&car.title)
        .bind(&car.type_id)
        .bind(&car.image_url)
        .bind(&car.description)
        .bind(&car.interior_image_url_one)
        .bind(&car.interior_image_url_two)
        .bind(car.gasoline)
        .bind(&car.steering)
        .bind(&car.capacity_id)
        .bind(&car.price_id)
        .bind(car.stars)
        .bind(car.reviews)
        .bind(car.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookup tables
    // -------------------------------------------------------------------------

    /// Lists all car types.
    pub async fn list_types(&self) -> DbResult<Vec<CarType>> {
        let records = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, car_type AS value FROM car_types ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| CarType {
                id: r.id,
                car_type: r.value,
            })
            .collect())
    }

    /// Gets a car type by ID.
    pub async fn get_type(&self, id: &str) -> DbResult<Option<CarType>> {
        let record = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, car_type AS value FROM car_types WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(|r| CarType {
            id: r.id,
            car_type: r.value,
        }))
    }

    /// Lists all capacities.
    pub async fn list_capacities(&self) -> DbResult<Vec<CarCapacity>> {
        let records = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, capacity AS value FROM car_capacities ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| CarCapacity {
                id: r.id,
                capacity: LookupValue::parse(&r.value),
            })
            .collect())
    }

    /// Gets a capacity by ID.
    pub async fn get_capacity(&self, id: &str) -> DbResult<Option<CarCapacity>> {
        let record = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, capacity AS value FROM car_capacities WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(|r| CarCapacity {
            id: r.id,
            capacity: LookupValue::parse(&r.value),
        }))
    }

    /// Lists all prices.
    pub async fn list_prices(&self) -> DbResult<Vec<CarPrice>> {
        let records = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, price AS value FROM car_prices ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| CarPrice {
                id: r.id,
                price: LookupValue::parse(&r.value),
            })
            .collect())
    }

    /// Gets a price by ID.
    pub async fn get_price(&self, id: &str) -> DbResult<Option<CarPrice>> {
        let record = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, price AS value FROM car_prices WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(|r| CarPrice {
            id: r.id,
            price: LookupValue::parse(&r.value),
        }))
    }

    /// Inserts a car type and returns the created row.
    pub async fn insert_type(&self, car_type: &str) -> DbResult<CarType> {
        let id = generate_id();
        let now = Utc::now();

        sqlx::query("INSERT INTO car_types (id, car_type, created_at) VALUES (?1, ?2, ?3)")
            .bind(&id)
            .bind(car_type)
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(CarType {
            id,
            car_type: car_type.to_string(),
        })
    }

    /// Inserts a capacity and returns the created row.
    pub async fn insert_capacity(&self, capacity: LookupValue) -> DbResult<CarCapacity> {
        let id = generate_id();
        let now = Utc::now();

        sqlx::query("INSERT INTO car_capacities (id, capacity, created_at) VALUES (?1, ?2, ?3)")
            .bind(&id)
            .bind(capacity.to_string())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(CarCapacity { id, capacity })
    }

    /// Inserts a price and returns the created row.
    pub async fn insert_price(&self, price: LookupValue) -> DbResult<CarPrice> {
        let id = generate_id();
        let now = Utc::now();

        sqlx::query("INSERT INTO car_prices (id, price, created_at) VALUES (?1, ?2, ?3)")
            .bind(&id)
            .bind(price.to_string())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(CarPrice { id, price })
    }

    // -------------------------------------------------------------------------
    // Cities
    // -------------------------------------------------------------------------

    /// Lists all available cities.
    pub async fn list_cities(&self) -> DbResult<Vec<AvailableCity>> {
        let records = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, city AS value FROM available_cities ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| AvailableCity {
                id: r.id,
                city: r.value,
            })
            .collect())
    }

    /// Gets a city by ID.
    pub async fn get_city(&self, id: &str) -> DbResult<Option<AvailableCity>> {
        let record = sqlx::query_as::<_, LookupRecord>(
            "SELECT id, city AS value FROM available_cities WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(|r| AvailableCity {
            id: r.id,
            city: r.value,
        }))
    }

    /// Inserts a city and returns the created row.
    pub async fn insert_city(&self, city: &str) -> DbResult<AvailableCity> {
        let id = generate_id();
        let now = Utc::now();

        sqlx::query("INSERT INTO available_cities (id, city, created_at) VALUES (?1, ?2, ?3)")
            .bind(&id)
            .bind(city)
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(AvailableCity {
            id,
            city: city.to_string(),
        })
    }
}

/// Generates a new entity ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
