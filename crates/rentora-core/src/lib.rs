//! # rentora-core: Pure Domain Logic for Rentora
//!
//! This crate is the **heart** of the Rentora marketplace. It contains the
//! domain types and the checkout workflow as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rentora Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Web Frontend                               │   │
//! │  │    Catalog ──► Detail ──► Favorites ──► Rental Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                      apps/api (axum)                            │   │
//! │  │    list_cars, add_to_favorites, create_rental_order, etc.      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rentora-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ checkout  │  │ validation│  │  display  │  │   │
//! │  │   │    Car    │  │  4-step   │  │   rules   │  │  catalog  │  │   │
//! │  │   │   Order   │  │   form    │  │  checks   │  │   joins   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rentora-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Car, lookup tables, RentalOrder, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout field validation rules
//! - [`checkout`] - Four-step rental checkout form and order assembly
//! - [`display`] - Catalog display rows joined from lookup lists

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod display;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rentora_core::Car` instead of
// `use rentora_core::types::Car`

pub use error::{CoreError, ValidationError};
pub use types::*;
