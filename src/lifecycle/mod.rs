//! Startup, wiring and shutdown of the storefront.

pub mod config;
pub mod storefront;
pub mod tracing;

pub use config::{ConfigError, StoreConfig};
pub use storefront::{Route, Storefront};
pub use self::tracing::setup_tracing;
