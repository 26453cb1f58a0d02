//! # Game Shop Console Library
//!
//! Console front ends for the game shop. Both front ends share one set of
//! commands; they differ only in who logs in and what menu they see.
//!
//! ## Module Organization
//! ```text
//! gameshop_console/
//! ├── lib.rs          ◄─── You are here (CLI, startup & run)
//! ├── console.rs      ◄─── Console trait, terminal + scripted implementations
//! ├── error.rs        ◄─── User-facing error type
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── ShopConfig and its layered loading
//! │   └── context.rs  ◄─── AppContext (services, config, clock)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared prompts (choices, yes/no, platform, duration)
//! │   ├── account.rs  ◄─── Sign-in, registration, customer selection
//! │   ├── rental.rs   ◄─── Rent a game
//! │   ├── sale.rs     ◄─── Buy a game
//! │   ├── returns.rs  ◄─── Return a rental, rental history
//! │   └── report.rs   ◄─── Customer list, shop revenue
//! └── frontend/
//!     ├── mod.rs      ◄─── Front end selection
//!     ├── customer.rs ◄─── Customer self-service menu
//!     └── employee.rs ◄─── Employee desk menu
//! ```
//!
//! ## Front Ends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer                          │  Employee                          │
//! │  ────────                          │  ────────                          │
//! │  Contact (or 'exit' to quit)       │  Email (or 'exit' to quit)         │
//! │   unknown → register               │   3 attempts                       │
//! │   known   → password, 3 attempts   │                                    │
//! │                                    │  1) Select/Add Customer            │
//! │  1) Rent                           │  2) View All Customers             │
//! │  2) Return                         │  3) View Shop Revenue              │
//! │  3) Buy                            │  4) Logout                         │
//! │  4) Log out                        │                                    │
//! │  5) Quit                           │  customer session:                 │
//! │                                    │  1) Rent 2) Buy 3) Return          │
//! │                                    │  4) View Rentals 5) Back           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod frontend;
pub mod state;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gameshop_db::{Database, DbConfig};

pub use console::{Console, ConsoleError, ScriptedConsole, TerminalConsole};
pub use error::{ErrorCode, ShopError, ShopResult};
pub use frontend::Frontend;
pub use state::{AppContext, ShopConfig};

/// Command line flags. Every flag overrides the matching config value.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "gameshop", about = "Console game rental and sale shop", version)]
pub struct Cli {
    /// Path to a TOML config file (default: <config dir>/shop.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Which front end to run
    #[arg(short, long, value_enum)]
    pub mode: Option<Frontend>,

    /// Currency symbol appended to prices
    #[arg(long)]
    pub currency: Option<String>,

    /// Shop name shown in the banner
    #[arg(long)]
    pub shop_name: Option<String>,
}

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load .env (dotenvy), then ShopConfig layers                         │
/// │  2. Initialize logging to stderr                                        │
/// │  3. Resolve database path and connect (migrations applied)              │
/// │  4. Build AppContext over Database::stores()                            │
/// │  5. Run the front end on the real terminal                              │
/// │  6. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Closing stdin ends the session like a quit.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ShopConfig::load(&cli).context("Failed to load configuration")?;
    init_tracing(&config.log_filter);

    info!(shop = %config.shop_name, frontend = %config.frontend, "Starting Game Shop console");

    let db_path = config
        .resolve_database_path()
        .context("Could not determine database location")?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path.clone()))
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let frontend = config.frontend;
    let ctx = AppContext::new(&db.stores(), config);
    let mut console = TerminalConsole::new();

    let outcome = frontend::launch(frontend, &ctx, &mut console).await;
    db.close().await;

    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_input_closed() => {
            info!("Input closed, exiting");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Output goes to stderr so it
/// never interleaves with menus on stdout.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
