//! # Seed Data Generator
//!
//! Populates a SQLite catalog with sample discounts for development.
//!
//! ## Usage
//! ```bash
//! # 50 discounts into ./data/discounts.db (defaults)
//! cargo run -p discount-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p discount-db --bin seed -- --count 200 --db ./dev.db
//! ```
//!
//! ## Generated Discounts
//! The spread is deterministic for a given count:
//! - Alternating `Fixed` (1..=25) and `Percentage` (5..=50) values
//! - All three use types, round robin
//! - 1 to 3 target items drawn from a fixed sample of item ids
//! - Every tenth discount already expired, so resolution has something to skip

use chrono::{Duration, Utc};
use discount_core::{Discount, DiscountType, UseType};
use discount_db::{generate_discount_id, Database, DbConfig};
use rust_decimal::Decimal;
use std::env;

const DEFAULT_COUNT: usize = 50;
const DEFAULT_DB_PATH: &str = "./data/discounts.db";

/// Sample item ids discounts can target.
const ITEMS: &[&str] = &[
    "item1", "item2", "item3", "item4", "item5", "item6", "item7", "item8", "coffee", "tea",
    "bagel", "muffin", "juice", "water", "sandwich", "salad",
];

const USE_TYPES: &[UseType] = &[UseType::SingleUse, UseType::MultiUse, UseType::InfinityUse];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Discount Catalog Seed Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of discounts to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Discount Catalog Seed Generator");
    println!("===============================");
    println!("Database:  {}", db_path);
    println!("Discounts: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let repo = db.discounts();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = repo.list_all().await?.len();
    if existing > 0 {
        println!("⚠ Catalog already has {} discounts", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for n in 0..count {
        let discount = generate_discount(n);
        if let Err(e) = repo.insert(&discount).await {
            eprintln!("Failed to insert {}: {}", discount.id, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} discounts in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Builds the `n`th sample discount.
fn generate_discount(n: usize) -> Discount {
    let (discount_type, value) = if n % 2 == 0 {
        (DiscountType::Fixed, Decimal::from(1 + (n * 7) % 25))
    } else {
        (DiscountType::Percentage, Decimal::from(5 + (n * 11) % 46))
    };

    let valid_until = if n % 10 == 9 {
        Utc::now() - Duration::days(1 + (n % 5) as i64)
    } else {
        Utc::now() + Duration::days(7 + (n % 60) as i64)
    };

    let item_count = 1 + n % 3;
    let items = (0..item_count).map(|k| ITEMS[(n * 5 + k * 3) % ITEMS.len()]);

    Discount::new(
        generate_discount_id(),
        valid_until,
        USE_TYPES[n % USE_TYPES.len()],
        discount_type,
        value,
        items,
    )
}
