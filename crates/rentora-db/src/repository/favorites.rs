//! # Favorites Repository
//!
//! The per-user favorites ledger. Row presence is set membership: a car is
//! a favorite exactly when a (user, car) row exists.
//!
//! The add path pre-checks for an existing row so the caller gets a clean
//! "already in favorites" error; the schema's unique compound key is what
//! actually guarantees at most one row per pair when two adds race.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentora_core::{Car, LikedCar};

#[derive(Debug, sqlx::FromRow)]
struct LikedCarRecord {
    id: String,
    user_id: String,
    car_id: String,
    is_liked: bool,
    created_at: DateTime<Utc>,
}

impl From<LikedCarRecord> for LikedCar {
    fn from(r: LikedCarRecord) -> Self {
        LikedCar {
            id: r.id,
            user_id: r.user_id,
            car_id: r.car_id,
            is_liked: r.is_liked,
            created_at: r.created_at,
        }
    }
}

/// Repository for the favorites ledger.
#[derive(Debug, Clone)]
pub struct FavoritesRepository {
    pool: SqlitePool,
}

impl FavoritesRepository {
    /// Creates a new FavoritesRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FavoritesRepository { pool }
    }

    /// Gets the favorites row for a (user, car) pair, if any.
    pub async fn get(&self, user_id: &str, car_id: &str) -> DbResult<Option<LikedCar>> {
        let record = sqlx::query_as::<_, LikedCarRecord>(
            r#"
            SELECT id, user_id, car_id, is_liked, created_at
            FROM liked_cars
            WHERE user_id = ?1 AND car_id = ?2
            "#,
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(LikedCar::from))
    }

    /// Adds a car to a user's favorites.
    ///
    /// Fails with UniqueViolation when the pair already has a row. The car
    /// itself is never verified; favoriting an unknown id writes a row.
    pub async fn add(&self, user_id: &str, car_id: &str) -> DbResult<LikedCar> {
        debug!(user_id = %user_id, car_id = %car_id, "Adding favorite");

        if self.get(user_id, car_id).await?.is_some() {
            return Err(DbError::duplicate("favorite"));
        }

        let liked = LikedCar {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            car_id: car_id.to_string(),
            is_liked: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO liked_cars (id, user_id, car_id, is_liked, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&liked.id)
        .bind(&liked.user_id)
        .bind(&liked.car_id)
        .bind(liked.is_liked)
        .bind(liked.created_at)
        .execute(&self.pool)
        .await?;

        Ok(liked)
    }

    /// Removes a car from a user's favorites.
    ///
    /// Fails with NotFound when the pair has no row.
    pub async fn remove(&self, user_id: &str, car_id: &str) -> DbResult<()> {
        debug!(user_id = %user_id, car_id = %car_id, "Removing favorite");

        let existing = self
            .get(user_id, car_id)
            .await?
            .ok_or_else(|| DbError::not_found("Favorite", car_id))?;

        sqlx::query("DELETE FROM liked_cars WHERE id = ?1")
            .bind(&existing.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists a user's favorites ledger rows.
    pub async fn list(&self, user_id: &str) -> DbResult<Vec<LikedCar>> {
        let records = sqlx::query_as::<_, LikedCarRecord>(
            r#"
            SELECT id, user_id, car_id, is_liked, created_at
            FROM liked_cars
            WHERE user_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(LikedCar::from).collect())
    }

    /// Lists the cars a user has favorited. Ledger rows whose car no
    /// longer exists are skipped.
    pub async fn list_cars(&self, user_id: &str) -> DbResult<Vec<Car>> {
        #[derive(Debug, sqlx::FromRow)]
        struct FavoriteCarRecord {
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

        let records = sqlx::query_as::<_, FavoriteCarRecord>(
            r#"
            SELECT c.id, c.title, c.type_id, c.image_url, c.description,
                   c.interior_image_url_one, c.interior_image_url_two,
                   c.gasoline, c.steering, c.capacity_id, c.price_id,
                   c.stars, c.reviews, c.created_at
            FROM liked_cars l
            INNER JOIN cars c ON c.id = l.car_id
            WHERE l.user_id = ?1
            ORDER BY l.rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| Car {
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
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
