//! Provider-independent building blocks for the graticule geocoder.
//!
//! [`Location`] is the normalized record every geocoder returns, [`Precision`]
//! ranks how coarse a match is, and [`config`] loads geocoder settings from the
//! environment.

mod app_config;
pub mod config;
pub mod location;
pub mod precision;

use thiserror::Error;

pub use app_config::GeocoderConfig;
pub use config::{load_geocoder_config, load_geocoder_config_from_env};
pub use location::{DistanceUnit, Location};
pub use precision::Precision;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid precision: {0}")]
    InvalidPrecision(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
