//! # Seed Data Generator
//!
//! Populates the database with demo group-buy items for development.
//!
//! ## Usage
//! ```bash
//! # Generate 24 items (default)
//! cargo run -p nestling-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p nestling-db --bin seed -- --count 60
//!
//! # Specify database path
//! cargo run -p nestling-db --bin seed -- --db ./data/nestling.db
//! ```
//!
//! ## Generated Items
//! Parenting products across a few categories, each with:
//! - Base price between 3,000 and 25,000 units
//! - A floor at 70% of base
//! - A step every 5, 10 or 20 participants, at 1%, 2% or 3% per step
//! - A cap of 20% or 30%
//! - Between 0 and 60 demo participants

use anyhow::Context;
use chrono::Utc;
use std::env;
use tracing_subscriber::EnvFilter;

use nestling_core::{compute_pricing_progress, Money, NewTeamItem, PricingParameters};
use nestling_db::{generate_team_item_id, Database, DbConfig};

/// Product categories for demo data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Feeding",
        &[
            "Infant formula 800g",
            "Bottle set",
            "Silicone bibs",
            "Sippy cups",
            "Bottle warmer",
            "High chair",
        ],
    ),
    (
        "Diapering",
        &[
            "Diapers size 2",
            "Diapers size 3",
            "Baby wipes",
            "Changing mat",
            "Diaper cream",
        ],
    ),
    (
        "Sleep",
        &[
            "Swaddle blankets",
            "Sleep sack",
            "Night light",
            "White noise machine",
            "Baby monitor",
        ],
    ),
    (
        "Outings",
        &[
            "Stroller",
            "Car seat",
            "Baby carrier",
            "Diaper bag",
            "Sun shade",
        ],
    ),
    (
        "Play",
        &[
            "Teething rings",
            "Activity gym",
            "Soft blocks",
            "Board books set",
        ],
    ),
];

/// Pack sizes sold as separate group buys
const PACKS: &[&str] = &["single", "2-pack", "family pack"];

const STEP_EVERY: &[i64] = &[5, 10, 20];
const STEP_PERCENT: &[f64] = &[1.0, 2.0, 3.0];
const MAX_DISCOUNT: &[f64] = &[20.0, 30.0];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 24;
    let mut db_path = String::from("./data/nestling.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(24);
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
                println!("Nestling Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of team items to generate (default: 24)");
                println!("  -d, --db <PATH>    Database file path (default: ./data/nestling.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Nestling Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .context("opening database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.team_items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} active items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating team items...");

    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut joined = 0;

    'outer: for (category, products) in CATEGORIES {
        for product in products.iter() {
            for pack in PACKS {
                if generated >= count {
                    break 'outer;
                }

                let new_item = generate_item(category, product, pack, generated);
                let item = match new_item.into_team_item(generate_team_item_id(), Utc::now()) {
                    Ok(item) => item,
                    Err(e) => {
                        eprintln!("Skipping {} ({}): {}", product, pack, e);
                        continue;
                    }
                };

                if let Err(e) = db.team_items().insert(&item).await {
                    eprintln!("Failed to insert {}: {}", item.title, e);
                    continue;
                }

                for n in 0..participants_for(generated) {
                    let user_id = format!("demo-parent-{:03}", n);
                    db.participations()
                        .join(&item.id, &user_id)
                        .await
                        .with_context(|| format!("joining {} to {}", user_id, item.title))?;
                    joined += 1;
                }

                generated += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} items and {} participations in {:?}",
        generated, joined, elapsed
    );

    println!();
    println!("Current prices:");
    for (item, participants) in db.team_items().list_active_with_counts(10).await? {
        let progress = compute_pricing_progress(participants, &item.pricing);
        println!(
            "  {:<36} {:>3} joined  {:>7} → {:>7}  (-{}%, {} to next step)",
            item.title,
            participants,
            item.pricing.base_price.to_string(),
            progress.price.current_price.to_string(),
            progress.price.discount_percent,
            progress.to_next_step,
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds a single item with deterministic pseudo-random pricing.
fn generate_item(category: &str, product: &str, pack: &str, seed: usize) -> NewTeamItem {
    let base_units = 3000 + ((seed * 733) % 22_000) as i64;
    let base_units = base_units - base_units % 100;
    let base_price = Money::from_units(base_units);
    let min_price = Money::from_units(base_units * 7 / 10);

    NewTeamItem {
        title: format!("{} ({})", product, pack),
        description: Some(format!("{} group buy, ships when the group closes", category)),
        pricing: PricingParameters {
            base_price,
            min_price,
            discount_step_every: STEP_EVERY[seed % STEP_EVERY.len()],
            discount_step_percent: STEP_PERCENT[seed % STEP_PERCENT.len()],
            max_discount_percent: MAX_DISCOUNT[seed % MAX_DISCOUNT.len()],
        },
    }
}

/// Demo participant count for the nth item (0..=60).
fn participants_for(seed: usize) -> usize {
    (seed * 37) % 61
}
