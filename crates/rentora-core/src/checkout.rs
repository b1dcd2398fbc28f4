//! # Rental Checkout
//!
//! The four-step rental checkout form and its submission logic.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rental Checkout Steps                              │
//! │                                                                         │
//! │  Step 1: Billing Info      name, phone, address, town/city             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Step 2: Rental Info       pickup + drop-off location/date/time        │
//! │       │                    (locations come from the city list)         │
//! │       ▼                                                                 │
//! │  Step 3: Payment Method    credit card / PayPal / Bitcoin              │
//! │       │                    (each optional, none exclusive)             │
//! │       ▼                                                                 │
//! │  Step 4: Confirmation      marketing + terms checkboxes                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit() ──► OrderDraft { billing_info, rental_info, payment_method } │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Submission serializes dates to "D-M-YYYY" without zero-padding and
//! normalizes card fields (a space every 4 digits, a slash after the
//! 2-digit month) before any payment validation runs.
//!
//! The step-4 checkboxes are carried in the form state but the submission
//! gate does not consult them. There is no ordering check between pickup
//! and drop-off dates either; a drop-off before the pickup is accepted.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{
    AvailableCity, BillingInfo, Bitcoin, CreditCard, PaymentMethod, Paypal, RentalInfo,
};
use crate::validation;

// =============================================================================
// Form Input
// =============================================================================

/// Raw credit card fields as typed into step 3.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardInput {
    pub card_number: String,
    pub expiration_date: String,
    pub card_holder: String,
    pub cvc: String,
}

/// Raw payment shapes as typed into step 3. Filling more than one shape,
/// or none at all, is not rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub credit_card: Option<CreditCardInput>,
    pub paypal: Option<Paypal>,
    pub bitcoin: Option<Bitcoin>,
}

/// The complete state of the checkout form at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    // Step 1: billing
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,

    // Step 2: schedule
    pub pick_up_location: String,
    pub pick_up_date: NaiveDate,
    pub pick_up_time: String,
    pub drop_off_location: String,
    pub drop_off_date: NaiveDate,
    pub drop_off_time: String,

    // Step 3: payment
    #[serde(default)]
    pub payment: PaymentInput,

    // Step 4: confirmation checkboxes
    #[serde(default)]
    pub marketing_opt_in: bool,
    #[serde(default)]
    pub terms_accepted: bool,
}

/// The assembled bundles a successful submission produces, ready to be
/// persisted as one rental order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub billing_info: BillingInfo,
    pub rental_info: RentalInfo,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Validates all steps and assembles the order bundles.
    ///
    /// `cities` is the list the location selects were populated from;
    /// both locations must reference one of its rows.
    pub fn submit(&self, cities: &[AvailableCity]) -> CoreResult<OrderDraft> {
        let billing_info = BillingInfo {
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
        };
        validation::validate_billing_info(&billing_info)?;

        let rental_info = self.build_rental_info(cities)?;
        let payment_method = build_payment_method(&self.payment)?;

        Ok(OrderDraft {
            billing_info,
            rental_info,
            payment_method,
        })
    }

    fn build_rental_info(&self, cities: &[AvailableCity]) -> CoreResult<RentalInfo> {
        resolve_city(cities, &self.pick_up_location)?;
        resolve_city(cities, &self.drop_off_location)?;

        validation::validate_time("pickUpTime", &self.pick_up_time)?;
        validation::validate_time("dropOffTime", &self.drop_off_time)?;

        Ok(RentalInfo {
            pick_up_location: self.pick_up_location.clone(),
            pick_up_date: format_order_date(self.pick_up_date),
            pick_up_time: self.pick_up_time.clone(),
            drop_off_location: self.drop_off_location.clone(),
            drop_off_date: format_order_date(self.drop_off_date),
            drop_off_time: self.drop_off_time.clone(),
        })
    }
}

fn resolve_city<'a>(cities: &'a [AvailableCity], id: &str) -> CoreResult<&'a AvailableCity> {
    cities
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| CoreError::CityNotFound(id.to_string()))
}

fn build_payment_method(input: &PaymentInput) -> CoreResult<PaymentMethod> {
    let credit_card = match &input.credit_card {
        Some(card) => {
            let card_number = format_card_number(&card.card_number);
            let expiration_date = format_expiration_date(&card.expiration_date);

            validation::validate_card_number(&card_number)?;
            validation::validate_expiration_date(&expiration_date)?;
            validation::validate_card_holder(&card.card_holder)?;
            validation::validate_cvc(&card.cvc)?;

            Some(CreditCard {
                card_number,
                expiration_date,
                card_holder: card.card_holder.clone(),
                cvc: card.cvc.clone(),
            })
        }
        None => None,
    };

    let paypal = match &input.paypal {
        Some(paypal) => {
            validation::validate_paypal_number(&paypal.paypal_number)?;
            Some(paypal.clone())
        }
        None => None,
    };

    let bitcoin = match &input.bitcoin {
        Some(bitcoin) => {
            validation::validate_bitcoin_number(&bitcoin.bitcoin_number)?;
            Some(bitcoin.clone())
        }
        None => None,
    };

    Ok(PaymentMethod {
        credit_card,
        paypal,
        bitcoin,
    })
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a rental date as "D-M-YYYY" with no zero-padding.
/// 2024-05-01 becomes "1-5-2024".
pub fn format_order_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.day(), date.month(), date.year())
}

/// Normalizes a card number into 4-digit groups separated by spaces.
/// Existing whitespace is stripped first, so already-formatted input is
/// left unchanged.
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }

    formatted
}

/// Normalizes an expiration date into "MM/YY". Non-digits are stripped and
/// a slash is inserted after the 2-digit month; shorter input passes
/// through for validation to reject.
pub fn format_expiration_date(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 2 {
        return digits;
    }

    format!("{}/{}", &digits[..2], &digits[2..])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<AvailableCity> {
        vec![
            AvailableCity {
                id: "city-a".to_string(),
                city: "New York".to_string(),
            },
            AvailableCity {
                id: "city-b".to_string(),
                city: "Chicago".to_string(),
            },
        ]
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Jo".to_string(),
            phone_number: "123456789".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            pick_up_location: "city-a".to_string(),
            pick_up_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            pick_up_time: "10:00".to_string(),
            drop_off_location: "city-b".to_string(),
            drop_off_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            drop_off_time: "09:00".to_string(),
            payment: PaymentInput {
                credit_card: Some(CreditCardInput {
                    card_number: "4111111111111111".to_string(),
                    expiration_date: "1225".to_string(),
                    card_holder: "Jo Smith".to_string(),
                    cvc: "123".to_string(),
                }),
                paypal: None,
                bitcoin: None,
            },
            marketing_opt_in: false,
            terms_accepted: false,
        }
    }

    #[test]
    fn test_format_order_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_order_date(date), "1-5-2024");

        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_order_date(date), "25-12-2024");
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(
            format_card_number("4111111111111111"),
            "4111 1111 1111 1111"
        );
        // Already formatted input round-trips.
        assert_eq!(
            format_card_number("4111 1111 1111 1111"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_format_expiration_date() {
        assert_eq!(format_expiration_date("1225"), "12/25");
        assert_eq!(format_expiration_date("12/25"), "12/25");
        assert_eq!(format_expiration_date("12"), "12/");
        assert_eq!(format_expiration_date("1"), "1");
    }

    #[test]
    fn test_submit_assembles_all_bundles() {
        let draft = valid_form().submit(&cities()).unwrap();

        assert_eq!(draft.billing_info.name, "Jo");
        assert_eq!(draft.rental_info.pick_up_date, "1-5-2024");
        assert_eq!(draft.rental_info.drop_off_date, "10-5-2024");

        let card = draft.payment_method.credit_card.unwrap();
        assert_eq!(card.card_number, "4111 1111 1111 1111");
        assert_eq!(card.expiration_date, "12/25");
    }

    #[test]
    fn test_submit_rejects_unknown_location() {
        let mut form = valid_form();
        form.pick_up_location = "city-z".to_string();

        let err = form.submit(&cities()).unwrap_err();
        assert!(matches!(err, CoreError::CityNotFound(_)));
    }

    #[test]
    fn test_submit_accepts_drop_off_before_pickup() {
        // No cross-field date ordering is enforced.
        let mut form = valid_form();
        form.pick_up_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        form.drop_off_date = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();

        let draft = form.submit(&cities()).unwrap();
        assert_eq!(draft.rental_info.drop_off_date, "20-4-2024");
    }

    #[test]
    fn test_submit_does_not_require_terms_acceptance() {
        // The confirmation checkboxes are not wired to the submission gate.
        let mut form = valid_form();
        form.marketing_opt_in = false;
        form.terms_accepted = false;

        assert!(form.submit(&cities()).is_ok());
    }

    #[test]
    fn test_submit_accepts_no_payment_shape_at_all() {
        let mut form = valid_form();
        form.payment = PaymentInput::default();

        let draft = form.submit(&cities()).unwrap();
        assert_eq!(draft.payment_method, PaymentMethod::default());
    }

    #[test]
    fn test_submit_accepts_all_three_payment_shapes_at_once() {
        let mut form = valid_form();
        form.payment.paypal = Some(Paypal {
            paypal_number: "1234567890123456".to_string(),
        });
        form.payment.bitcoin = Some(Bitcoin {
            bitcoin_number: "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq".to_string(),
        });

        let draft = form.submit(&cities()).unwrap();
        assert!(draft.payment_method.credit_card.is_some());
        assert!(draft.payment_method.paypal.is_some());
        assert!(draft.payment_method.bitcoin.is_some());
    }

    #[test]
    fn test_submit_rejects_bad_billing_phone() {
        let mut form = valid_form();
        form.phone_number = "12345".to_string();

        assert!(form.submit(&cities()).is_err());
    }

    #[test]
    fn test_submit_rejects_short_card_number() {
        let mut form = valid_form();
        form.payment.credit_card.as_mut().unwrap().card_number = "4111".to_string();

        assert!(form.submit(&cities()).is_err());
    }
}
