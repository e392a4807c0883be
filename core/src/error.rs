// storefront/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::catalog::ProductId;

#[derive(Debug, Error)]
pub enum StorefrontError {
  /// An add was requested for an id that is not in the catalog.
  /// Product cards only offer catalog ids, so reaching this is an invariant violation.
  #[error("Unknown product id: {product_id}")]
  UnknownProduct { product_id: ProductId },

  #[error("Invalid catalog: {0}")]
  InvalidCatalog(String),

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No pipeline registered for action '{action}'")]
  ActionNotRegistered { action: String },

  #[error("Error in action handler. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal storefront error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for StorefrontError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a StorefrontError that was only boxed into anyhow for transport.
    match err.downcast::<StorefrontError>() {
      Ok(inner) => inner,
      Err(source) => StorefrontError::HandlerError { source },
    }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
