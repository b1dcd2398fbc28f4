//! # Validation Module
//!
//! Field validation rules for the rental checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Inline field messages, immediate feedback                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (checkout submission)                            │
//! │  ├── Same rules re-checked before an order is assembled                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL and UNIQUE constraints                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are counted in characters, not bytes, so names like "Jo" and
//! "Åke" behave the same way.

use crate::error::ValidationError;
use crate::types::BillingInfo;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Billing Info (Step 1)
// =============================================================================

/// Validates a billing name. At least 2 characters.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    require_min_chars("name", name, 2)
}

/// Validates a phone number. Exactly 9 digits, nothing else.
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phoneNumber".to_string(),
        });
    }

    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phoneNumber".to_string(),
            reason: "must contain only digits from 0 to 9".to_string(),
        });
    }

    if phone.len() != 9 {
        return Err(ValidationError::ExactLength {
            field: "phoneNumber".to_string(),
            len: 9,
        });
    }

    Ok(())
}

/// Validates a billing address. At least 5 characters.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    require_min_chars("address", address, 5)
}

/// Validates a billing town/city. At least 3 characters.
pub fn validate_billing_city(city: &str) -> ValidationResult<()> {
    require_min_chars("city", city, 3)
}

/// Validates the whole billing bundle, field by field in form order.
pub fn validate_billing_info(billing: &BillingInfo) -> ValidationResult<()> {
    validate_name(&billing.name)?;
    validate_phone_number(&billing.phone_number)?;
    validate_address(&billing.address)?;
    validate_billing_city(&billing.city)?;
    Ok(())
}

// =============================================================================
// Rental Info (Step 2)
// =============================================================================

/// Validates a pickup or drop-off time. Required, free-form "HH:MM";
/// no range or ordering check is applied.
pub fn validate_time(field: &str, time: &str) -> ValidationResult<()> {
    if time.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Payment Method (Step 3)
// =============================================================================

/// Validates a formatted card number: 16 digits in 4-digit groups,
/// 19 characters total ("4111 1111 1111 1111").
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    if card_number.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cardNumber".to_string(),
        });
    }

    if card_number.chars().count() != 19 {
        return Err(ValidationError::ExactLength {
            field: "cardNumber".to_string(),
            len: 19,
        });
    }

    let groups_ok = card_number
        .split(' ')
        .all(|group| group.len() == 4 && group.chars().all(|c| c.is_ascii_digit()));

    if !groups_ok || card_number.split(' ').count() != 4 {
        return Err(ValidationError::InvalidFormat {
            field: "cardNumber".to_string(),
            reason: "must be 16 digits in groups of 4".to_string(),
        });
    }

    Ok(())
}

/// Validates a formatted expiration date: "MM/YY", 5 characters.
pub fn validate_expiration_date(expiration: &str) -> ValidationResult<()> {
    if expiration.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "expirationDate".to_string(),
        });
    }

    if expiration.chars().count() != 5 {
        return Err(ValidationError::ExactLength {
            field: "expirationDate".to_string(),
            len: 5,
        });
    }

    let chars: Vec<char> = expiration.chars().collect();
    let shape_ok = chars[2] == '/'
        && chars[..2].iter().all(|c| c.is_ascii_digit())
        && chars[3..].iter().all(|c| c.is_ascii_digit());

    if !shape_ok {
        return Err(ValidationError::InvalidFormat {
            field: "expirationDate".to_string(),
            reason: "must consist of month and year as MM/YY".to_string(),
        });
    }

    Ok(())
}

/// Validates a card holder name. At least 5 characters.
pub fn validate_card_holder(card_holder: &str) -> ValidationResult<()> {
    require_min_chars("cardHolder", card_holder, 5)
}

/// Validates a CVC: exactly 3 digits.
pub fn validate_cvc(cvc: &str) -> ValidationResult<()> {
    if cvc.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cvc".to_string(),
        });
    }

    if cvc.chars().count() != 3 || !cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::ExactLength {
            field: "cvc".to_string(),
            len: 3,
        });
    }

    Ok(())
}

/// Validates a PayPal identifier: exactly 16 characters.
pub fn validate_paypal_number(paypal_number: &str) -> ValidationResult<()> {
    if paypal_number.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "paypalNumber".to_string(),
        });
    }

    if paypal_number.chars().count() != 16 {
        return Err(ValidationError::ExactLength {
            field: "paypalNumber".to_string(),
            len: 16,
        });
    }

    Ok(())
}

/// Validates a Bitcoin wallet string. Required, otherwise free-form.
pub fn validate_bitcoin_number(bitcoin_number: &str) -> ValidationResult<()> {
    if bitcoin_number.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "bitcoinNumber".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Reviews
// =============================================================================

/// Validates review text before submission. Empty or whitespace-only text
/// is rejected by the caller, not by the ledger.
pub fn validate_review_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "review".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn require_min_chars(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name("Alexandra").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("123456789").is_ok());

        assert!(validate_phone_number("12345678").is_err());
        assert!(validate_phone_number("1234567890").is_err());
        assert!(validate_phone_number("12345678a").is_err());
        assert!(validate_phone_number("").is_err());
    }

    #[test]
    fn test_validate_address_and_city() {
        assert!(validate_address("1 Main St").is_ok());
        assert!(validate_address("abc").is_err());

        assert!(validate_billing_city("Springfield").is_ok());
        assert!(validate_billing_city("NY").is_err());
    }

    #[test]
    fn test_validate_billing_info_checks_fields_in_order() {
        let billing = BillingInfo {
            name: "J".to_string(),
            phone_number: "bad".to_string(),
            address: "".to_string(),
            city: "".to_string(),
        };

        // The first failing field wins.
        let err = validate_billing_info(&billing).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("4111 1111 1111 1111").is_ok());

        // Unformatted input is rejected; formatting happens before validation.
        assert!(validate_card_number("4111111111111111").is_err());
        assert!(validate_card_number("4111 1111 1111").is_err());
        assert!(validate_card_number("abcd efgh ijkl mnop").is_err());
    }

    #[test]
    fn test_validate_expiration_date() {
        assert!(validate_expiration_date("12/25").is_ok());

        assert!(validate_expiration_date("1225").is_err());
        assert!(validate_expiration_date("12-25").is_err());
        assert!(validate_expiration_date("1/25").is_err());
    }

    #[test]
    fn test_validate_cvc() {
        assert!(validate_cvc("123").is_ok());
        assert!(validate_cvc("12").is_err());
        assert!(validate_cvc("1234").is_err());
        assert!(validate_cvc("12a").is_err());
    }

    #[test]
    fn test_validate_paypal_number() {
        assert!(validate_paypal_number("1234567890123456").is_ok());
        assert!(validate_paypal_number("12345").is_err());
    }

    #[test]
    fn test_validate_bitcoin_number() {
        assert!(validate_bitcoin_number("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq").is_ok());
        assert!(validate_bitcoin_number("  ").is_err());
    }

    #[test]
    fn test_validate_review_text() {
        assert!(validate_review_text("hello").is_ok());
        assert!(validate_review_text("").is_err());
        assert!(validate_review_text("   \n").is_err());
    }
}
