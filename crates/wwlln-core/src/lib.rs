//! Domain model for WWLLN lightning-strike data.
//!
//! Holds everything that does not touch the network: the strike record and
//! snapshot types, great-circle distance, the nearest/radius filters, and
//! client configuration.

pub mod config;
pub mod filter;
pub mod geo;
pub mod strike;

use thiserror::Error;

pub use config::{load_client_config, load_client_config_from_env, ClientConfig};
pub use filter::{nearest, within_radius};
pub use geo::{distance, Unit};
pub use strike::{NearbyStrike, Strike, StrikeSnapshot};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unit must be either \"imperial\" or \"metric\", got \"{0}\"")]
    InvalidUnit(String),

    #[error("no strikes to search")]
    EmptySnapshot,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
