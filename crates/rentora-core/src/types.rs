//! # Domain Types
//!
//! Core domain types used throughout Rentora.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Car        │   │    LikedCar     │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title          │   │  user_id        │   │  user_id        │       │
//! │  │  type_id (FK)   │   │  car_id (FK)    │   │  car_id (FK)    │       │
//! │  │  capacity_id    │   │  is_liked       │   │  review         │       │
//! │  │  price_id       │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CarType       │   │  CarCapacity    │   │   RentalOrder   │       │
//! │  │   CarPrice      │   │  AvailableCity  │   │  billing_info   │       │
//! │  │  (lookup rows)  │   │  (lookup rows)  │   │  rental_info    │       │
//! │  └─────────────────┘   └─────────────────┘   │  payment_method │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity id is a UUID v4 string assigned at insert time; references
//! between entities are plain id strings resolved by the data layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Lookup Value
// =============================================================================

/// A lookup-table display value that may be a number or free text.
///
/// Capacity and price tables hold values like `4`, `8`, `"99"` or
/// `"on request"`. Serialized untagged so the JSON stays `4 | "on request"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum LookupValue {
    Number(f64),
    Text(String),
}

impl LookupValue {
    /// Numeric view of the value. Non-numeric text maps to 0, which is what
    /// the catalog display rows show for unparsable lookups.
    pub fn as_number(&self) -> f64 {
        match self {
            LookupValue::Number(n) => *n,
            LookupValue::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Parses a raw stored string back into a value. Numeric text becomes
    /// a number, everything else stays text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) => LookupValue::Number(n),
            Err(_) => LookupValue::Text(raw.to_string()),
        }
    }
}

impl std::fmt::Display for LookupValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            LookupValue::Text(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A car available for rent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Car {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title shown on catalog cards and the detail page.
    pub title: String,

    /// Reference into the car type lookup table.
    pub type_id: String,

    /// Main catalog image.
    pub image_url: String,

    /// Long-form description for the detail page.
    pub description: String,

    /// Optional interior shots for the detail gallery.
    pub interior_image_url_one: Option<String>,
    pub interior_image_url_two: Option<String>,

    /// Tank volume in liters.
    pub gasoline: f64,

    /// Steering kind shown on the card ("Manual", "Automatic", ...).
    pub steering: String,

    /// Reference into the capacity lookup table.
    pub capacity_id: String,

    /// Reference into the price lookup table.
    pub price_id: String,

    /// Optional star rating, 0 to 5.
    pub stars: Option<f64>,

    /// Denormalized review counter. Bumped by the review ledger.
    pub reviews: Option<i64>,

    /// When the car was added to the catalog.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A row in the car type lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CarType {
    pub id: String,
    /// Display name, e.g. "Sport" or "SUV".
    pub car_type: String,
}

/// A row in the capacity lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CarCapacity {
    pub id: String,
    /// Seat count, number-or-string.
    pub capacity: LookupValue,
}

/// A row in the price lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CarPrice {
    pub id: String,
    /// Daily price in dollars, number-or-string.
    pub price: LookupValue,
}

/// A fully resolved car: the row plus all three lookup references.
///
/// Either every reference resolves or the lookup fails as a whole; a
/// partially resolved car is never produced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedCar {
    pub car: Car,
    pub car_type: CarType,
    pub car_capacity: CarCapacity,
    pub car_price: CarPrice,
}

// =============================================================================
// Favorites
// =============================================================================

/// A favorites ledger entry. Row presence is set membership: at most one
/// row exists per (user_id, car_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LikedCar {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    pub is_liked: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reviews
// =============================================================================

/// A free-text review left on a car. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    pub review: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Cities
// =============================================================================

/// A city offered for pickup and drop-off selection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AvailableCity {
    pub id: String,
    pub city: String,
}

// =============================================================================
// Rental Order
// =============================================================================

/// Billing details from step 1 of the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
}

/// Schedule details from step 2 of the checkout form.
///
/// Locations are AvailableCity ids. Dates are stored as submitted, in
/// "D-M-YYYY" form without zero-padding; times are free-form "HH:MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalInfo {
    pub pick_up_location: String,
    pub pick_up_date: String,
    pub pick_up_time: String,
    pub drop_off_location: String,
    pub drop_off_date: String,
    pub drop_off_time: String,
}

/// Credit card details, stored formatted: the number in 4-digit groups,
/// the expiration as "MM/YY".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub card_number: String,
    pub expiration_date: String,
    pub card_holder: String,
    pub cvc: String,
}

/// PayPal account reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Paypal {
    pub paypal_number: String,
}

/// Bitcoin wallet reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bitcoin {
    pub bitcoin_number: String,
}

/// Payment method bundle from step 3 of the checkout form.
///
/// All three shapes are optional and none is mutually exclusive with the
/// others; whatever the user filled in is what gets stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal: Option<Paypal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitcoin: Option<Bitcoin>,
}

/// The persisted result of a completed checkout. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RentalOrder {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    pub billing_info: BillingInfo,
    pub rental_info: RentalInfo,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_value_parse_numeric() {
        assert_eq!(LookupValue::parse("4"), LookupValue::Number(4.0));
        assert_eq!(LookupValue::parse("99.5"), LookupValue::Number(99.5));
    }

    #[test]
    fn test_lookup_value_parse_text() {
        assert_eq!(
            LookupValue::parse("on request"),
            LookupValue::Text("on request".to_string())
        );
    }

    #[test]
    fn test_lookup_value_as_number_falls_back_to_zero() {
        assert_eq!(LookupValue::Text("n/a".to_string()).as_number(), 0.0);
        assert_eq!(LookupValue::Number(8.0).as_number(), 8.0);
    }

    #[test]
    fn test_lookup_value_display() {
        assert_eq!(LookupValue::Number(4.0).to_string(), "4");
        assert_eq!(LookupValue::Number(99.5).to_string(), "99.5");
        assert_eq!(LookupValue::Text("two".to_string()).to_string(), "two");
    }

    #[test]
    fn test_payment_method_serializes_only_filled_shapes() {
        let method = PaymentMethod {
            paypal: Some(Paypal {
                paypal_number: "1234567890123456".to_string(),
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&method).unwrap();
        assert!(json.get("creditCard").is_none());
        assert!(json.get("bitcoin").is_none());
        assert_eq!(json["paypal"]["paypalNumber"], "1234567890123456");
    }

    #[test]
    fn test_lookup_value_untagged_json() {
        let capacity = CarCapacity {
            id: "cap-1".to_string(),
            capacity: LookupValue::Number(4.0),
        };
        let json = serde_json::to_string(&capacity).unwrap();
        assert!(json.contains("\"capacity\":4"));
    }
}
