//! # Bindery Log
//!
//! Logging setup shared by bindery binaries. Library crates only emit
//! `tracing` events; this crate decides where they go.
//!
//! ```no_run
//! fn main() -> Result<(), bindery_log::LogError> {
//!     bindery_log::auto_init()?;
//!
//!     tracing::info!(port = 8080, "server starting");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, DisplayConfig, ENV_LOG, ENV_LOG_FORMAT, Format, Writer};
pub use error::LogError;

/// Auto-detect and initialize the best logging configuration
///
/// Uses the environment when `BINDERY_LOG` or `RUST_LOG` is set, the
/// development preset in debug builds and the production preset otherwise.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn auto_init() -> Result<(), LogError> {
    if std::env::var_os(ENV_LOG).is_some() || std::env::var_os("RUST_LOG").is_some() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> Result<(), LogError> {
    init_with(Config::default())
}

/// Initialize with custom configuration
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init_with(config: Config) -> Result<(), LogError> {
    LoggerBuilder::from_config(config).build()
}
