//! # Game Shop Console Entry Point
//!
//! ## Startup Sequence
//! 1. Parse CLI flags
//! 2. Load configuration (defaults, TOML, .env, environment, flags)
//! 3. Initialize tracing (stderr)
//! 4. Open the database and run migrations
//! 5. Run the configured front end until the user quits
//!
//! A database that cannot be opened ends the process with a non-zero
//! status. Quitting from a menu or closing stdin exits with status 0.

use clap::Parser;

use gameshop_console::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for testability
    gameshop_console::run(Cli::parse()).await
}
