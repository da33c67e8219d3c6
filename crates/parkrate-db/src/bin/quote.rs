//! # Quote
//!
//! Prices one parking session against the database and prints the result.
//!
//! ## Usage
//! ```bash
//! # Two and a half hours starting now
//! cargo run -p parkrate-db --bin quote -- --property demo-lot --hours 2.5
//!
//! # Fixed start, with a discount code, consuming one use
//! cargo run -p parkrate-db --bin quote -- --property demo-lot --hours 3 \
//!     --start 2024-03-11T14:00:00Z --code welcome10 --redeem
//! ```
//!
//! The `PriceResult` is written to stdout as pretty JSON; logs go to stderr.

use chrono::{DateTime, Utc};
use parkrate_core::{PricingService, QuoteRequest};
use parkrate_db::{Database, DbConfig};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env()?;
    let mut property_id: Option<String> = None;
    let mut hours: Option<f64> = None;
    let mut start: DateTime<Utc> = Utc::now();
    let mut code: Option<String> = None;
    let mut redeem = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--property" | "-p" => {
                if i + 1 < args.len() {
                    property_id = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--hours" | "-H" => {
                if i + 1 < args.len() {
                    hours = Some(
                        args[i + 1]
                            .parse()
                            .map_err(|_| format!("invalid --hours: {}", args[i + 1]))?,
                    );
                    i += 1;
                }
            }
            "--start" | "-s" => {
                if i + 1 < args.len() {
                    start = DateTime::parse_from_rfc3339(&args[i + 1])
                        .map_err(|e| format!("invalid --start: {}", e))?
                        .with_timezone(&Utc);
                    i += 1;
                }
            }
            "--code" | "-c" => {
                if i + 1 < args.len() {
                    code = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--redeem" => redeem = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let (Some(property_id), Some(hours)) = (property_id, hours) else {
        print_usage();
        return Err("--property and --hours are required".into());
    };

    let db = Database::new(config).await?;
    let service = PricingService::new(db.rules(), db.discounts());

    let mut request = QuoteRequest::new(property_id, start, hours);
    if let Some(code) = code {
        request = request.with_code(code);
    }

    let result = service.quote(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if redeem {
        match &result.discount_applied {
            Some(discount) => {
                let redeemed = db.discounts().redeem(&discount.id).await?;
                info!(code = %discount.code, redeemed, "Redemption attempted");
                if !redeemed {
                    return Err(format!("discount {} could not be redeemed", discount.code).into());
                }
            }
            None => warn!("--redeem given but no discount was applied"),
        }
    }

    db.close().await;
    Ok(())
}

fn print_usage() {
    println!("ParkRate Quote");
    println!();
    println!("Usage: quote --property <ID> --hours <H> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -p, --property <ID>     Property to price (required)");
    println!("  -H, --hours <H>         Session length in hours, fractional allowed (required)");
    println!("  -s, --start <RFC3339>   Session start (default: now)");
    println!("  -c, --code <CODE>       Discount code");
    println!("  -d, --db <PATH>         Database file path (default: $PARKRATE_DB_PATH or ./parkrate.db)");
    println!("      --redeem            Consume one use of the applied discount");
    println!("  -h, --help              Show this help message");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,parkrate=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
