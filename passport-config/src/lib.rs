//! Configuration for the Passport client.
//!
//! Values are layered: compiled defaults, then a TOML or JSON file, then a
//! `.env` file, then `PASSPORT_*` environment variables. The loader records
//! which file (if any) was used so the binary can log it at startup.

pub mod error;
pub mod loader;
pub mod models;
pub mod util;

pub use error::ConfigError;
pub use loader::{ConfigLoad, ConfigLoader, env_keys};
pub use models::{
    ApiSettings, ConfigSource, LoggingSettings, NavigationSettings,
    PassportConfig, ScanSettings,
};
