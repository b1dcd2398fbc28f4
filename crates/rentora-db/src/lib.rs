//! # rentora-db: Database Layer for Rentora
//!
//! This crate provides database access for the Rentora marketplace.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rentora Data Flow                                │
//! │                                                                         │
//! │  API handler (list_cars, add_to_favorites, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rentora-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Catalog       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Favorites     │    │ 001_init.sql │  │   │
//! │  │   │ WAL mode      │    │ Reviews       │    │ ...          │  │   │
//! │  │   │               │    │ RentalOrders  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                       SQLite Database (one file)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations per ledger
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rentora_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/rentora.db")).await?;
//! let cars = db.catalog().list_cars().await?;
//! db.favorites().add(user_id, car_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::favorites::FavoritesRepository;
pub use repository::rental::RentalOrderRepository;
pub use repository::reviews::ReviewRepository;
