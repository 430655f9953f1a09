//! Shared domain types and configuration for the `hdbpark` workspace.

pub mod app_config;
pub mod availability;
pub mod config;
pub mod reference;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use availability::{lot_type_label, AvailabilitySnapshot, CarparkAvailability, LotAvailability};
pub use config::{load_app_config, load_app_config_from_env};
pub use reference::ReferenceRow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
