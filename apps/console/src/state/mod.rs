//! # Application State
//!
//! Everything a command needs, built once at startup:
//!
//! - [`ShopConfig`]: read-only settings (currency, shop name, database path)
//! - [`AppContext`]: the shop and account services plus config and clock

pub mod config;
pub mod context;

pub use config::{ConfigError, ShopConfig};
pub use context::{AppContext, Clock};
