//! End-to-end tests driving the HTTP surface against an in-memory
//! database. Each test spins its own server on an ephemeral port.

use std::net::SocketAddr;

use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use rentora_api::{app, AppState};
use rentora_core::{Car, LookupValue};
use rentora_db::{Database, DbConfig};

const TEST_SECRET: &str = "integration-test-secret";

struct TestApp {
    addr: SocketAddr,
    state: AppState,
    client: Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn token(&self, user_id: &str) -> String {
        self.state.tokens.issue(user_id).unwrap()
    }
}

async fn spawn_app() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(db, TEST_SECRET);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        addr,
        state,
        client: Client::new(),
    }
}

/// Seeds one car with its lookup rows and two cities. Returns
/// (car_id, city_a_id, city_b_id).
async fn seed_catalog(state: &AppState) -> (String, String, String) {
    let catalog = state.db.catalog();

    let car_type = catalog.insert_type("Sport").await.unwrap();
    let capacity = catalog
        .insert_capacity(LookupValue::Number(2.0))
        .await
        .unwrap();
    let price = catalog.insert_price(LookupValue::Number(99.0)).await.unwrap();

    let car = Car {
        id: uuid::Uuid::new_v4().to_string(),
        title: "Koenigsegg".to_string(),
        type_id: car_type.id,
        image_url: "koenigsegg.png".to_string(),
        description: "The fastest one".to_string(),
        interior_image_url_one: None,
        interior_image_url_two: None,
        gasoline: 90.0,
        steering: "Manual".to_string(),
        capacity_id: capacity.id,
        price_id: price.id,
        stars: Some(4.5),
        reviews: None,
        created_at: Utc::now(),
    };
    catalog.insert_car(&car).await.unwrap();

    let city_a = catalog.insert_city("New York").await.unwrap();
    let city_b = catalog.insert_city("Chicago").await.unwrap();

    (car.id, city_a.id, city_b.id)
}

fn checkout_body(car_id: &str, pick_up: &str, drop_off: &str) -> Value {
    json!({
        "carId": car_id,
        "name": "Jo",
        "phoneNumber": "123456789",
        "address": "1 Main St",
        "city": "Springfield",
        "pickUpLocation": pick_up,
        "pickUpDate": "2024-05-01",
        "pickUpTime": "10:00",
        "dropOffLocation": drop_off,
        "dropOffDate": "2024-04-20",
        "dropOffTime": "09:00",
        "payment": {
            "creditCard": {
                "cardNumber": "4111111111111111",
                "expirationDate": "1225",
                "cardHolder": "Jo Smith",
                "cvc": "123"
            }
        },
        "marketingOptIn": false,
        "termsAccepted": false
    })
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn get_by_id_returns_fully_resolved_car() {
    let app = spawn_app().await;
    let (car_id, _, _) = seed_catalog(&app.state).await;

    let resp = app
        .client
        .get(app.url(&format!("/api/cars/{}", car_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["car"]["title"], "Koenigsegg");
    assert_eq!(body["carType"]["type"], "Sport");
    assert_eq!(body["carCapacity"]["capacity"], 2.0);
    assert_eq!(body["carPrice"]["price"], 99.0);
}

#[tokio::test]
async fn get_by_id_unknown_car_is_404() {
    let app = spawn_app().await;
    seed_catalog(&app.state).await;

    let resp = app
        .client
        .get(app.url("/api/cars/no-such-car"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn search_requires_identity() {
    let app = spawn_app().await;
    seed_catalog(&app.state).await;

    let resp = app
        .client
        .get(app.url("/api/cars/search"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = app
        .client
        .get(app.url("/api/cars/search"))
        .bearer_auth(app.token("user-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn cities_endpoint_fails_when_table_is_empty() {
    let app = spawn_app().await;
    // No seeding: the city table is empty.

    let resp = app.client.get(app.url("/api/cities")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn listing_joins_lookups_and_merges_favorites() {
    let app = spawn_app().await;
    let (car_id, _, _) = seed_catalog(&app.state).await;
    let token = app.token("user-1");

    app.client
        .post(app.url(&format!("/api/favorites/{}", car_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    // Anonymous listing: joined values present, nothing liked.
    let body: Value = app
        .client
        .get(app.url("/api/cars/listing"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["typeName"], "Sport");
    assert_eq!(body[0]["price"], 99.0);
    assert_eq!(body[0]["isLiked"], false);

    // Authenticated listing: the favorite shows up.
    let body: Value = app
        .client
        .get(app.url("/api/cars/listing"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["isLiked"], true);
}

// =============================================================================
// Favorites
// =============================================================================

#[tokio::test]
async fn favorites_round_trip_and_double_add_conflicts() {
    let app = spawn_app().await;
    let (car_id, _, _) = seed_catalog(&app.state).await;
    let token = app.token("user-1");

    // Anonymous list degrades to empty.
    let body: Value = app
        .client
        .get(app.url("/api/favorites"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Anonymous add is rejected.
    let resp = app
        .client
        .post(app.url(&format!("/api/favorites/{}", car_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Add succeeds once.
    let resp = app
        .client
        .post(app.url(&format!("/api/favorites/{}", car_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // The second add conflicts and the list stays at one entry.
    let resp = app
        .client
        .post(app.url(&format!("/api/favorites/{}", car_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let body: Value = app
        .client
        .get(app.url("/api/favorites"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let favorites = body.as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["isLiked"], true);
    assert_eq!(favorites[0]["title"], "Koenigsegg");

    // Remove restores the prior state; removing again is 404.
    let resp = app
        .client
        .delete(app.url(&format!("/api/favorites/{}", car_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .delete(app.url(&format!("/api/favorites/{}", car_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

// =============================================================================
// Reviews
// =============================================================================

#[tokio::test]
async fn review_submission_grows_list_and_counter() {
    let app = spawn_app().await;
    let (car_id, _, _) = seed_catalog(&app.state).await;
    let token = app.token("user-1");

    // Whitespace-only text is rejected before the ledger is touched.
    let resp = app
        .client
        .post(app.url(&format!("/api/cars/{}/reviews", car_id)))
        .bearer_auth(&token)
        .json(&json!({ "review": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let resp = app
        .client
        .post(app.url(&format!("/api/cars/{}/reviews", car_id)))
        .bearer_auth(&token)
        .json(&json!({ "review": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = app
        .client
        .get(app.url(&format!("/api/cars/{}/reviews", car_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["review"], "hello");

    // The denormalized counter on the car tracks the list length.
    let body: Value = app
        .client
        .get(app.url(&format!("/api/cars/{}", car_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["car"]["reviews"], 1);
}

// =============================================================================
// Rental Checkout
// =============================================================================

#[tokio::test]
async fn checkout_requires_identity() {
    let app = spawn_app().await;
    let (car_id, city_a, city_b) = seed_catalog(&app.state).await;

    let resp = app
        .client
        .post(app.url("/api/rentals"))
        .json(&checkout_body(&car_id, &city_a, &city_b))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn checkout_stores_formatted_fields_and_unordered_dates() {
    let app = spawn_app().await;
    let (car_id, city_a, city_b) = seed_catalog(&app.state).await;

    let resp = app
        .client
        .post(app.url("/api/rentals"))
        .bearer_auth(app.token("user-1"))
        .json(&checkout_body(&car_id, &city_a, &city_b))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let order_id = body["rentalOrder"].as_str().unwrap();

    let order = app
        .state
        .db
        .rentals()
        .get_by_id(order_id)
        .await
        .unwrap()
        .unwrap();

    // Dates went out as "D-M-YYYY" without zero-padding, and the drop-off
    // preceding the pickup was accepted as-is.
    assert_eq!(order.rental_info.pick_up_date, "1-5-2024");
    assert_eq!(order.rental_info.drop_off_date, "20-4-2024");

    // Card fields were reformatted before storage.
    let card = order.payment_method.credit_card.unwrap();
    assert_eq!(card.card_number, "4111 1111 1111 1111");
    assert_eq!(card.expiration_date, "12/25");
}

#[tokio::test]
async fn checkout_succeeds_for_nonexistent_car() {
    // Order creation stores the car reference without verifying it.
    let app = spawn_app().await;
    let (_, city_a, city_b) = seed_catalog(&app.state).await;

    let resp = app
        .client
        .post(app.url("/api/rentals"))
        .bearer_auth(app.token("user-1"))
        .json(&checkout_body("no-such-car", &city_a, &city_b))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let orders = app.state.db.rentals().list_by_user("user-1").await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].car_id, "no-such-car");
}

#[tokio::test]
async fn checkout_rejects_bad_billing_and_unknown_location() {
    let app = spawn_app().await;
    let (car_id, city_a, city_b) = seed_catalog(&app.state).await;
    let token = app.token("user-1");

    // Phone number with the wrong length fails validation.
    let mut body = checkout_body(&car_id, &city_a, &city_b);
    body["phoneNumber"] = json!("12345");
    let resp = app
        .client
        .post(app.url("/api/rentals"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    // A location outside the offered city list fails validation.
    let mut body = checkout_body(&car_id, &city_a, &city_b);
    body["pickUpLocation"] = json!("not-a-city");
    let resp = app
        .client
        .post(app.url("/api/rentals"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    // Nothing was persisted for either attempt.
    assert!(app
        .state
        .db
        .rentals()
        .list_by_user("user-1")
        .await
        .unwrap()
        .is_empty());
}
