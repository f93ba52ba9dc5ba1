//! Persisted user preferences for tabpilot.
//!
//! Settings live in two TOML tiers: a fast local file and a
//! cross-device synced file. The synced tier wins on conflict and
//! each tier is opportunistically backfilled from the merged view.
//! Missing configuration is never fatal - defaults apply.

pub mod error;
pub mod schema;
pub mod store;

pub use error::ConfigError;
pub use schema::Settings;
pub use store::SettingsStore;
