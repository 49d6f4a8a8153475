//! # Seed Data Generator
//!
//! Populates the database with the demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./storefront_dev.db
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! ## Catalog
//! | Title                     | Price | Inventory |
//! |---------------------------|-------|-----------|
//! | FIFA 19                   | 29.99 | 5         |
//! | Fallout 4                 | 39.99 | 5         |
//! | Star Wars Battlefront ||  | 19.99 | 5         |
//! | Gears of War 3            |  9.99 | 0         |

use std::env;
use storefront_core::{NewProduct, ValidationError};
use storefront_db::{Database, DbConfig};

/// Demo catalog: (title, price, inventory)
const CATALOG: &[(&str, &str, i64)] = &[
    ("FIFA 19", "29.99", 5),
    ("Fallout 4", "39.99", 5),
    ("Star Wars Battlefront ||", "19.99", 5),
    ("Gears of War 3", "9.99", 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./storefront_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Storefront Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Inserting catalog...");

    for product in catalog()? {
        let inserted = db.products().insert(&product).await?;
        println!(
            "  #{} {} ({}, {} in stock)",
            inserted.id,
            inserted.title,
            inserted.price(),
            inserted.inventory_count
        );
    }

    let in_stock = db.products().list(Some(0)).await?;
    println!();
    println!("✓ Seed complete! {} of {} products in stock", in_stock.len(), CATALOG.len());

    db.close().await;
    Ok(())
}

/// Builds the normalized catalog entries.
fn catalog() -> Result<Vec<NewProduct>, ValidationError> {
    CATALOG
        .iter()
        .map(|(title, price, inventory)| {
            NewProduct::normalized(title, Some(price.parse()?), Some(*inventory))
        })
        .collect()
}
