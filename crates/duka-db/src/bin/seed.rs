//! # Seed Data Generator
//!
//! Populates the database with the standard category set and sample
//! inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed into the default dev database
//! cargo run -p duka-db --bin seed
//!
//! # Specify database path
//! cargo run -p duka-db --bin seed -- --db ./data/duka.db
//! ```
//!
//! Seeding is idempotent: categories are get-or-create and items are
//! skipped when an active item already carries the exact same name, so
//! re-running against a live database adds nothing.

use std::collections::HashSet;
use std::env;

use duka_db::repository::item::NewItem;
use duka_db::repository::supplier::NewSupplier;
use duka_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// The standard stationery category set, with sample items:
/// (category, description, [(name, unit_price_cents, cost_price_cents,
/// stock, minimum_stock)]).
#[allow(clippy::type_complexity)]
const CATEGORIES: &[(&str, &str, &[(&str, i64, i64, i64, i64)])] = &[
    (
        "Pens",
        "Ballpoint, gel, fountain and marker pens",
        &[
            ("Bic Ballpoint Blue", 50_000, 30_000, 120, 30),
            ("Bic Ballpoint Black", 50_000, 30_000, 100, 30),
            ("Gel Pen Set 0.5mm", 250_000, 160_000, 25, 10),
            ("Permanent Marker Black", 120_000, 75_000, 40, 15),
        ],
    ),
    (
        "Pencils",
        "Graphite and colored pencils",
        &[
            ("HB Pencil", 30_000, 18_000, 200, 50),
            ("Colored Pencils 12pc", 450_000, 280_000, 18, 8),
            ("Mechanical Pencil 0.7mm", 180_000, 110_000, 30, 10),
        ],
    ),
    (
        "Paper",
        "Loose paper, photocopy reams and specialty paper",
        &[
            ("A4 Ream 80gsm", 1_500_000, 1_100_000, 45, 20),
            ("A4 Ream 70gsm", 1_300_000, 950_000, 30, 15),
            ("Flip Chart Paper", 800_000, 550_000, 12, 5),
        ],
    ),
    (
        "Notebooks",
        "Exercise books, diaries and journals",
        &[
            ("Exercise Book 200pg", 150_000, 95_000, 150, 40),
            ("Hardcover Journal A5", 600_000, 380_000, 20, 8),
            ("Counter Book 3-Quire", 350_000, 220_000, 35, 12),
        ],
    ),
    (
        "Office Supplies",
        "Staplers, punches, clips and desk accessories",
        &[
            ("Stapler Medium", 550_000, 350_000, 15, 5),
            ("Staples Box 26/6", 100_000, 60_000, 50, 20),
            ("Paper Clips 100pc", 80_000, 45_000, 60, 20),
            ("2-Hole Punch", 700_000, 450_000, 8, 3),
        ],
    ),
    (
        "Art Supplies",
        "Paints, brushes and craft materials",
        &[
            ("Watercolor Set 12", 500_000, 320_000, 10, 4),
            ("Paint Brush Set", 300_000, 190_000, 14, 5),
        ],
    ),
    (
        "Erasers & Correctors",
        "Erasers, correction fluid and tape",
        &[
            ("Eraser Large", 40_000, 22_000, 80, 25),
            ("Correction Fluid 20ml", 150_000, 90_000, 30, 10),
        ],
    ),
    (
        "Rulers & Measuring",
        "Rulers, set squares and protractors",
        &[
            ("Ruler 30cm", 60_000, 35_000, 70, 20),
            ("Math Set Complete", 400_000, 250_000, 22, 8),
        ],
    ),
    (
        "Storage & Organization",
        "Files, folders and box files",
        &[
            ("Box File A4", 450_000, 280_000, 25, 10),
            ("Suspension Files 10pc", 900_000, 600_000, 10, 4),
            ("Plastic Folder A4", 70_000, 40_000, 90, 30),
        ],
    ),
    (
        "Labels & Stickers",
        "Address labels, price stickers and tags",
        &[
            ("Price Stickers Roll", 250_000, 150_000, 20, 8),
            ("Address Labels 100pc", 350_000, 210_000, 15, 6),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./duka_dev.db");

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
                println!("Duka Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./duka_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Duka Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    // A default supplier so seeded items have a restock source.
    let supplier = match db.suppliers().list_active().await?.into_iter().next() {
        Some(existing) => existing,
        None => {
            db.suppliers()
                .create(NewSupplier {
                    name: "Karatasi Wholesale Traders".to_string(),
                    contact_person: Some("Mr. Hassan".to_string()),
                    phone: Some("+255 22 260 0000".to_string()),
                    ..Default::default()
                })
                .await?
        }
    };

    // Exact-name presence check; generated SKUs embed the entry date, so
    // they cannot be recomputed to detect a previous run.
    let mut seeded_names: HashSet<String> = db
        .items()
        .list_active()
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect();

    let mut categories_created = 0;
    let mut items_created = 0;
    let mut items_skipped = 0;
    let start = std::time::Instant::now();

    for &(name, description, items) in CATEGORIES {
        let before = db.categories().get_by_name(name).await?;
        let category = db.categories().get_or_create(name, Some(description)).await?;
        if before.is_none() {
            categories_created += 1;
        }

        for &(item_name, unit_price, cost_price, stock, minimum) in items {
            if seeded_names.contains(item_name) {
                items_skipped += 1;
                continue;
            }

            db.items()
                .create(NewItem {
                    sku: None,
                    name: item_name.to_string(),
                    description: None,
                    category_id: category.id.clone(),
                    supplier_id: Some(supplier.id.clone()),
                    unit_price_cents: unit_price,
                    cost_price_cents: cost_price,
                    stock_quantity: stock,
                    minimum_stock: minimum,
                })
                .await?;
            seeded_names.insert(item_name.to_string());
            items_created += 1;
        }
    }

    let elapsed = start.elapsed();
    println!("✓ Categories: {} created", categories_created);
    println!(
        "✓ Items: {} created, {} already present",
        items_created, items_skipped
    );
    println!("  Took {:?}", elapsed);

    // Quick sanity pass over what landed.
    println!();
    let low = db.items().low_stock().await?;
    println!("  Active items: {}", db.items().count().await?);
    println!("  Low stock:    {}", low.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
