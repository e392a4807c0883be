// storefront/src/flows/common_steps.rs

//! Handlers shared by several action pipelines.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::{StorefrontError, StorefrontResult};
use crate::flows::contexts::{ActionCtxData, Effect, StoreState};
use crate::view;
use tracing::{debug, error};

pub const APPLY_TO_CART: &str = "apply_to_cart";
pub const RENDER_CART: &str = "render_cart";
pub const CLOSE_OVERLAY: &str = "close_overlay";

pub(crate) fn store_of(ctx_data: &ContextData<ActionCtxData>) -> ContextData<StoreState> {
  ctx_data.read().store.clone()
}

/// Renders the full current cart. The only step that produces `Effect::RenderCart`.
pub fn render_cart(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let cart_view = {
    let store = store_of(ctx_data);
    let guard = store.read();
    view::render_cart(guard.cart.lines(), guard.cart.totals())
  };
  debug!(
    empty = cart_view.is_empty(),
    items = cart_view.totals().quantity,
    "Cart rendered."
  );
  ctx_data.write().effects.push(Effect::RenderCart(cart_view));
  Ok(PipelineControl::Continue)
}

/// `after` hook on `apply_to_cart`: unique ids and no line at quantity zero.
pub fn verify_cart(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let store = store_of(ctx_data);
  let consistent = store.read().cart.is_consistent();
  if !consistent {
    let action = ctx_data.read().action;
    error!(%action, "Cart invariant violated after mutation.");
    return Err(StorefrontError::Internal(format!(
      "cart invariant violated after {action}"
    )));
  }
  Ok(PipelineControl::Continue)
}

pub fn close_overlay(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  store_of(ctx_data).write().cart_open = false;
  ctx_data.write().effects.push(Effect::SetCartOpen(false));
  Ok(PipelineControl::Continue)
}

/// `skip_if` for `close_overlay`.
pub fn overlay_closed(ctx_data: &ContextData<ActionCtxData>) -> bool {
  !store_of(ctx_data).read().cart_open
}
