//! CLI subcommand implementations.

pub mod cart;

use rocketshoes_cart::{ApiError, CartError, ConfigError};
use thiserror::Error;

/// Errors that end a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is unusable.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// A flag value could not be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store API client could not be built.
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

impl CliError {
    /// Whether the failure should be reported to Sentry.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        match self {
            Self::Config(_) | Self::InvalidArgument(_) => false,
            Self::Api(_) => true,
            Self::Cart(e) => e.is_infrastructure(),
        }
    }
}
