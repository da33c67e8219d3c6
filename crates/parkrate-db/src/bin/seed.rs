//! # Seed Data Generator
//!
//! Populates the database with a demo property for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./parkrate.db with property "demo-lot" in New York time
//! cargo run -p parkrate-db --bin seed
//!
//! # Custom property and timezone
//! cargo run -p parkrate-db --bin seed -- --property airport --timezone America/Chicago
//!
//! # Specify database path
//! cargo run -p parkrate-db --bin seed -- --db ./data/parkrate.db
//! ```
//!
//! ## Generated Rules
//! | Priority | Rule             | Days    | Window        | Rate           |
//! |----------|------------------|---------|---------------|----------------|
//! | 20       | Overnight flat   | every   | 22:00 - 06:00 | $8.00 flat     |
//! | 10       | Weekday daytime  | Mon-Fri | 09:00 - 18:00 | $3.00 / hour   |
//! | 1        | Daily cap        | every   | all day       | $25.00 / day   |
//!
//! Plus the discount code `WELCOME10` (10% off, 100 uses).

use chrono::NaiveTime;
use parkrate_core::{Discount, DiscountType, PricingRule, RateType};
use parkrate_db::{Database, DbConfig};
use std::env;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_PROPERTY: &str = "demo-lot";
const DEFAULT_TIMEZONE: &str = "America/New_York";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env()?;
    let mut property_id = String::from(DEFAULT_PROPERTY);
    let mut timezone = String::from(DEFAULT_TIMEZONE);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--property" | "-p" => {
                if i + 1 < args.len() {
                    property_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--timezone" | "-t" => {
                if i + 1 < args.len() {
                    timezone = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ParkRate Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: $PARKRATE_DB_PATH or ./parkrate.db)");
                println!("  -p, --property <ID>    Property ID (default: {})", DEFAULT_PROPERTY);
                println!("  -t, --timezone <TZ>    IANA timezone (default: {})", DEFAULT_TIMEZONE);
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 ParkRate Seed Data Generator");
    println!("===============================");
    println!("Database: {}", config.database_path.display());
    println!("Property: {} ({})", property_id, timezone);
    println!();

    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing rules
    let existing = db.rules().count(&property_id).await?;
    if existing > 0 {
        println!("⚠ Property already has {} pricing rules", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    db.properties()
        .upsert(&property_id, "Demo Lot", Some(&timezone))
        .await?;
    println!("✓ Property saved");

    let rules = demo_rules(&property_id)?;
    for rule in &rules {
        db.rules().insert(rule).await?;
        println!(
            "  + {:<16} priority {:>2}  {:?} {}",
            rule.name.as_deref().unwrap_or("-"),
            rule.priority,
            rule.rate_type,
            rule.amount()
        );
    }
    println!("✓ Inserted {} pricing rules", rules.len());

    let discount = db
        .discounts()
        .insert(
            &Discount::new(
                Uuid::new_v4().to_string(),
                &property_id,
                "welcome10",
                DiscountType::Percentage,
                10,
            )
            .with_usage(Some(100), 0),
        )
        .await?;
    println!("✓ Inserted discount code {}", discount.code);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Overnight flat, weekday daytime hourly, and an all-day daily cap.
fn demo_rules(property_id: &str) -> Result<Vec<PricingRule>, Box<dyn std::error::Error>> {
    let hm = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).ok_or("invalid hour");

    Ok(vec![
        PricingRule::new(Uuid::new_v4().to_string(), property_id, RateType::Flat, 800)
            .with_name("Overnight flat")
            .with_priority(20)
            .with_window(hm(22)?, hm(6)?),
        PricingRule::new(Uuid::new_v4().to_string(), property_id, RateType::Hourly, 300)
            .with_name("Weekday daytime")
            .with_priority(10)
            .with_days(vec![1, 2, 3, 4, 5])
            .with_window(hm(9)?, hm(18)?),
        PricingRule::new(Uuid::new_v4().to_string(), property_id, RateType::Daily, 2500)
            .with_name("Daily cap")
            .with_priority(1),
    ])
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,parkrate=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
