//! # Seed Data Loader
//!
//! Populates a database with a sample catalogue and a staff account.
//!
//! ## Usage
//! ```bash
//! # Seed ./gameshop_dev.db with the default admin account
//! cargo run -p gameshop-db --bin seed
//!
//! # Specify database path and admin credentials
//! cargo run -p gameshop-db --bin seed -- --db ./data/gameshop.db \
//!     --email boss@gameshop.local --password s3cret
//! ```
//!
//! Catalogue titles already in the database are skipped, and the staff
//! account is only created when no employee exists, so running twice never
//! duplicates anything.

use std::collections::HashSet;

use clap::Parser;

use gameshop_core::{AccountService, Game, ListingType, Money, Platform};
use gameshop_db::{Database, DbConfig};

/// (title, genre, platform, listing, price in cents)
const CATALOGUE: &[(&str, &str, Platform, ListingType, i64)] = &[
    ("Halo Infinite", "Shooter", Platform::XboxSeriesX, ListingType::Rental, 499),
    ("Forza Horizon 5", "Racing", Platform::XboxSeriesX, ListingType::Rental, 599),
    ("Starfield", "RPG", Platform::XboxSeriesS, ListingType::Rental, 699),
    ("Gears 5", "Shooter", Platform::XboxOne, ListingType::Rental, 299),
    ("Sea of Thieves", "Adventure", Platform::XboxOne, ListingType::Sale, 2999),
    ("Microsoft Flight Simulator", "Simulation", Platform::XboxSeriesX, ListingType::Sale, 5999),
    ("God of War Ragnarok", "Action", Platform::Ps5, ListingType::Rental, 699),
    ("Spider-Man 2", "Action", Platform::Ps5, ListingType::Rental, 799),
    ("Elden Ring", "RPG", Platform::Ps5, ListingType::Sale, 4999),
    ("The Last of Us Part II", "Action", Platform::Ps4, ListingType::Rental, 399),
    ("Bloodborne", "RPG", Platform::Ps4, ListingType::Sale, 1999),
    ("Gran Turismo 7", "Racing", Platform::Ps4, ListingType::Sale, 3999),
    ("Age of Empires IV", "Strategy", Platform::PcWindows, ListingType::Rental, 399),
    ("Baldur's Gate 3", "RPG", Platform::PcAny, ListingType::Rental, 599),
    ("Factorio", "Strategy", Platform::PcAny, ListingType::Sale, 3000),
    ("Stardew Valley", "Simulation", Platform::PcAny, ListingType::Sale, 1399),
    ("Cities: Skylines", "Simulation", Platform::PcMac, ListingType::Rental, 349),
    ("Counter-Strike 2", "Shooter", Platform::PcLinux, ListingType::Rental, 199),
];

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Game Shop seed data loader")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./gameshop_dev.db")]
    db: String,

    /// Email of the staff account to create
    #[arg(long, default_value = "admin@gameshop.local")]
    email: String,

    /// Password of the staff account to create
    #[arg(long, default_value = "admin")]
    password: String,

    /// Display name of the staff account
    #[arg(long, default_value = "Shop Admin")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Game Shop Seed Data Loader");
    println!("=============================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Catalogue: titles already stocked are left alone
    let stocked: HashSet<String> = db
        .games()
        .list_all()
        .await?
        .into_iter()
        .map(|g| g.title)
        .collect();

    let mut inserted = 0;
    for (title, genre, platform, listing, cents) in CATALOGUE {
        if stocked.contains(*title) {
            continue;
        }
        let game = Game::new(*title, *genre, *platform, *listing, Money::from_cents(*cents));
        if let Err(e) = db.games().insert(&game).await {
            eprintln!("Failed to insert {}: {}", title, e);
            continue;
        }
        inserted += 1;
    }
    if inserted == 0 {
        println!("⚠ Catalogue already stocked ({} games), skipping", stocked.len());
    } else {
        println!("✓ Inserted {} games", inserted);
    }

    // Staff account
    if db.employees().count().await? > 0 {
        println!("⚠ Employees already exist, skipping staff account");
    } else {
        let accounts = AccountService::new(&db.stores());
        let employee = accounts
            .register_employee(&args.name, &args.email, &args.password)
            .await?;
        println!("✓ Created staff account {}", employee.email);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
