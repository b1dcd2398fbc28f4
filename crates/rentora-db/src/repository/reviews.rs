//! # Review Repository
//!
//! The append-only review ledger and the denormalized counter on the car
//! row.
//!
//! ## Counter Maintenance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Review Counter Strategy                          │
//! │                                                                     │
//! │  ❌ WRONG: read-modify-write (loses updates under interleaving)    │
//! │     n = SELECT reviews FROM cars WHERE id = ?                      │
//! │     UPDATE cars SET reviews = n + 1 WHERE id = ?                   │
//! │                                                                     │
//! │  ✅ CORRECT: single atomic increment                               │
//! │     UPDATE cars SET reviews = COALESCE(reviews, 0) + 1             │
//! │                                                                     │
//! │  Two interleaved submissions each bump by one; the counter tracks  │
//! │  the row count.                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The insert and the counter bump are still two statements, not one
//! transaction; a review row can exist for a car that disappeared between
//! them, matching the rest of the ledger's fire-and-forget writes.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rentora_core::Review;

#[derive(Debug, sqlx::FromRow)]
struct ReviewRecord {
    id: String,
    user_id: String,
    car_id: String,
    review: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRecord> for Review {
    fn from(r: ReviewRecord) -> Self {
        Review {
            id: r.id,
            user_id: r.user_id,
            car_id: r.car_id,
            review: r.review,
            created_at: r.created_at,
        }
    }
}

/// Repository for the review ledger.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReviewRepository { pool }
    }

    /// Appends a review and bumps the car's counter by exactly one.
    ///
    /// Text emptiness is the caller's check; the ledger stores whatever it
    /// is handed. Fails with NotFound when the counter bump matches no
    /// car row; the review row has been written by then.
    pub async fn add(&self, user_id: &str, car_id: &str, text: &str) -> DbResult<Review> {
        debug!(user_id = %user_id, car_id = %car_id, "Adding review");

        let review = Review {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            car_id: car_id.to_string(),
            review: text.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO reviews (id, user_id, car_id, review, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&review.id)
        .bind(&review.user_id)
        .bind(&review.car_id)
        .bind(&review.review)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query(
            "UPDATE cars SET reviews = COALESCE(reviews, 0) + 1 WHERE id = ?1",
        )
        .bind(car_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", car_id));
        }

        Ok(review)
    }

    /// Lists all reviews for a car in insertion order.
    pub async fn list_by_car(&self, car_id: &str) -> DbResult<Vec<Review>> {
        let records = sqlx::query_as::<_, ReviewRecord>(
            r#"
            SELECT id, user_id, car_id, review, created_at
            FROM reviews
            WHERE car_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Review::from).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::catalog::generate_id;
    use rentora_core::{Car, LookupValue};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_car(db: &Database) -> Car {
        let catalog = db.catalog();
        let car_type = catalog.insert_type("Sedan").await.unwrap();
        let capacity = catalog
            .insert_capacity(LookupValue::Number(4.0))
            .await
            .unwrap();
        let price = catalog.insert_price(LookupValue::Number(45.0)).await.unwrap();

        let car = Car {
            id: generate_id(),
            title: "MG ZX Exclusive".to_string(),
            type_id: car_type.id,
            image_url: "mg.png".to_string(),
            description: "A sedan".to_string(),
            interior_image_url_one: None,
            interior_image_url_two: None,
            gasoline: 60.0,
            steering: "Automatic".to_string(),
            capacity_id: capacity.id,
            price_id: price.id,
            stars: None,
            reviews: None,
            created_at: Utc::now(),
        };
        catalog.insert_car(&car).await.unwrap();
        car
    }

    #[tokio::test]
    async fn test_add_review_grows_list_and_counter_together() {
        let db = test_db().await;
        let car = seed_car(&db).await;
        let reviews = db.reviews();

        reviews.add("user-1", &car.id, "hello").await.unwrap();

        let listed = reviews.list_by_car(&car.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].review, "hello");

        let stored = db.catalog().get_car(&car.id).await.unwrap().unwrap();
        assert_eq!(stored.reviews, Some(1));
    }

    #[tokio::test]
    async fn test_counter_starts_from_absent_and_accumulates() {
        let db = test_db().await;
        let car = seed_car(&db).await;
        let reviews = db.reviews();

        reviews.add("user-1", &car.id, "great").await.unwrap();
        reviews.add("user-2", &car.id, "fine").await.unwrap();
        reviews.add("user-1", &car.id, "again").await.unwrap();

        let listed = reviews.list_by_car(&car.id).await.unwrap();
        let stored = db.catalog().get_car(&car.id).await.unwrap().unwrap();

        assert_eq!(listed.len(), 3);
        assert_eq!(stored.reviews, Some(listed.len() as i64));
    }

    #[tokio::test]
    async fn test_reviews_keep_insertion_order() {
        let db = test_db().await;
        let car = seed_car(&db).await;
        let reviews = db.reviews();

        reviews.add("user-1", &car.id, "first").await.unwrap();
        reviews.add("user-1", &car.id, "second").await.unwrap();

        let listed = reviews.list_by_car(&car.id).await.unwrap();
        assert_eq!(listed[0].review, "first");
        assert_eq!(listed[1].review, "second");
    }

    #[tokio::test]
    async fn test_add_review_for_missing_car_fails_after_writing_row() {
        let db = test_db().await;
        let reviews = db.reviews();

        let err = reviews.add("user-1", "no-such-car", "hello").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // The ledger row was written before the counter bump failed.
        let listed = reviews.list_by_car("no-such-car").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_car_is_scoped_to_the_car() {
        let db = test_db().await;
        let first = seed_car(&db).await;
        let second = seed_car(&db).await;
        let reviews = db.reviews();

        reviews.add("user-1", &first.id, "on first").await.unwrap();

        assert!(reviews.list_by_car(&second.id).await.unwrap().is_empty());
    }
}
