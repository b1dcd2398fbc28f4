//! # Rental Order Repository
//!
//! Persistence for completed checkouts. One insert per submission; orders
//! are immutable afterwards.
//!
//! The create path writes unconditionally: it does not verify that the car
//! exists, that the location references resolve, or that the schedule
//! avoids other orders for the same car. The only guarantee is that a row
//! was written.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use rentora_core::{BillingInfo, PaymentMethod, RentalInfo, RentalOrder};

#[derive(Debug, sqlx::FromRow)]
struct RentalOrderRecord {
    id: String,
    user_id: String,
    car_id: String,
    billing_info: String,
    rental_info: String,
    payment_method: String,
    created_at: DateTime<Utc>,
}

impl RentalOrderRecord {
    fn into_order(self) -> DbResult<RentalOrder> {
        Ok(RentalOrder {
            id: self.id,
            user_id: self.user_id,
            car_id: self.car_id,
            billing_info: serde_json::from_str(&self.billing_info)?,
            rental_info: serde_json::from_str(&self.rental_info)?,
            payment_method: serde_json::from_str(&self.payment_method)?,
            created_at: self.created_at,
        })
    }
}

/// Repository for rental orders.
#[derive(Debug, Clone)]
pub struct RentalOrderRepository {
    pool: SqlitePool,
}

impl RentalOrderRepository {
    /// Creates a new RentalOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalOrderRepository { pool }
    }

    /// Inserts a rental order and returns it.
    ///
    /// `car_id` is stored as given; no referential or availability check
    /// runs here.
    pub async fn create(
        &self,
        user_id: &str,
        car_id: &str,
        billing_info: &BillingInfo,
        rental_info: &RentalInfo,
        payment_method: &PaymentMethod,
    ) -> DbResult<RentalOrder> {
        debug!(user_id = %user_id, car_id = %car_id, "Creating rental order");

        let order = RentalOrder {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            car_id: car_id.to_string(),
            billing_info: billing_info.clone(),
            rental_info: rental_info.clone(),
            payment_method: payment_method.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO rental_orders (
                id, user_id, car_id, billing_info, rental_info, payment_method, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(&order.car_id)
        .bind(serde_json::to_string(&order.billing_info)?)
        .bind(serde_json::to_string(&order.rental_info)?)
        .bind(serde_json::to_string(&order.payment_method)?)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        info!(order_id = %order.id, car_id = %car_id, "Rental order created");

        Ok(order)
    }

    /// Gets a rental order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<RentalOrder>> {
        let record = sqlx::query_as::<_, RentalOrderRecord>(
            r#"
            SELECT id, user_id, car_id, billing_info, rental_info, payment_method, created_at
            FROM rental_orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(RentalOrderRecord::into_order).transpose()
    }

    /// Lists a user's rental orders in insertion order.
    pub async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<RentalOrder>> {
        let records = sqlx::query_as::<_, RentalOrderRecord>(
            r#"
            SELECT id, user_id, car_id, billing_info, rental_info, payment_method, created_at
            FROM rental_orders
            WHERE user_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        records
            .into_iter()
            .map(RentalOrderRecord::into_order)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
