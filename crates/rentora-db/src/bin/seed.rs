//! # Seed Data Generator
//!
//! Populates the database with a development catalog.
//!
//! ## Usage
//! ```bash
//! cargo run -p rentora-db --bin seed
//!
//! # Specify database path
//! cargo run -p rentora-db --bin seed -- --db ./data/rentora.db
//! ```
//!
//! Creates the four lookup tables, the city list and a dozen cars with
//! realistic titles and images, the same shape the production catalog has.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use rentora_core::{Car, LookupValue};
use rentora_db::{Database, DbConfig};

/// Catalog rows: (title, type, gasoline liters, steering, seats, daily price).
const CARS: &[(&str, &str, f64, &str, f64, f64)] = &[
    ("Koenigsegg", "Sport", 90.0, "Manual", 2.0, 99.0),
    ("Nissan GT-R", "Sport", 80.0, "Manual", 2.0, 80.0),
    ("Rolls-Royce", "Sedan", 70.0, "Manual", 4.0, 96.0),
    ("All New Rush", "SUV", 70.0, "Manual", 6.0, 72.0),
    ("CR-V", "SUV", 80.0, "Manual", 6.0, 80.0),
    ("All New Terios", "SUV", 90.0, "Manual", 6.0, 74.0),
    ("MG ZX Exclusive", "Hatchback", 70.0, "Electric", 4.0, 76.0),
    ("New MG ZS", "SUV", 80.0, "Electric", 6.0, 80.0),
    ("MG ZX Excite", "Hatchback", 90.0, "Electric", 4.0, 74.0),
    ("Fiat Panda", "Hatchback", 40.0, "Manual", 4.0, 45.0),
    ("Toyota Camry", "Sedan", 60.0, "Automatic", 4.0, 55.0),
    ("Tesla Model S", "Sedan", 0.0, "Automatic", 4.0, 120.0),
];

const CITIES: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Seattle",
];

#[tokio::main]
async fn main() {
    let db_path = parse_db_path();
    println!("Seeding database at {}", db_path);

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .expect("Failed to open database");

    let catalog = db.catalog();

    // Lookup tables first; cars reference them.
    let mut type_ids = std::collections::HashMap::new();
    for car_type in ["Sport", "SUV", "Sedan", "Hatchback"] {
        let row = catalog
            .insert_type(car_type)
            .await
            .expect("Failed to insert car type");
        type_ids.insert(car_type, row.id);
    }

    let mut capacity_ids = std::collections::HashMap::new();
    for seats in [2u32, 4, 6, 8] {
        let row = catalog
            .insert_capacity(LookupValue::Number(seats as f64))
            .await
            .expect("Failed to insert capacity");
        capacity_ids.insert(seats, row.id);
    }

    let mut price_ids = std::collections::HashMap::new();
    for (_, _, _, _, _, price) in CARS {
        let key = *price as u32;
        if !price_ids.contains_key(&key) {
            let row = catalog
                .insert_price(LookupValue::Number(*price))
                .await
                .expect("Failed to insert price");
            price_ids.insert(key, row.id);
        }
    }

    for city in CITIES {
        catalog.insert_city(city).await.expect("Failed to insert city");
    }

    let mut count = 0;
    for (title, car_type, gasoline, steering, seats, price) in CARS {
        let slug = title.to_lowercase().replace(' ', "-");
        let car = Car {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            type_id: type_ids[car_type].clone(),
            image_url: format!("{}.png", slug),
            description: format!(
                "{} is a {} with room for {} and a {} liter tank.",
                title, car_type, *seats as u32, gasoline
            ),
            interior_image_url_one: Some(format!("{}-interior-1.png", slug)),
            interior_image_url_two: Some(format!("{}-interior-2.png", slug)),
            gasoline: *gasoline,
            steering: steering.to_string(),
            capacity_id: capacity_ids[&(*seats as u32)].clone(),
            price_id: price_ids[&(*price as u32)].clone(),
            stars: None,
            reviews: None,
            created_at: Utc::now(),
        };

        catalog.insert_car(&car).await.expect("Failed to insert car");
        count += 1;
    }

    println!(
        "Seeded {} cars, {} cities, {} types",
        count,
        CITIES.len(),
        type_ids.len()
    );
}

fn parse_db_path() -> String {
    let args: Vec<String> = env::args().collect();
    let mut path = "./rentora.db".to_string();

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--db" && i + 1 < args.len() {
            path = args[i + 1].clone();
            i += 2;
        } else {
            i += 1;
        }
    }

    path
}
