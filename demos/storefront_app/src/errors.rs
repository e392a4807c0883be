// demos/storefront_app/src/errors.rs

use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Storefront Error: {source}")]
  Storefront {
    #[from]
    source: StorefrontError,
  },

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Render Error: {0}")]
  Render(#[from] serde_json::Error),

  /// A line from the user that is not a valid command. Reported, never fatal.
  #[error("{0}")]
  Command(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
