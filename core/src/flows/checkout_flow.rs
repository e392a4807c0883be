// storefront/src/flows/checkout_flow.rs

//! Simulated checkout. No payment or order is created.

use crate::action::ActionKind;
use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::core::step::SkipCondition;
use crate::error::{StorefrontError, StorefrontResult};
use crate::flows::cart_flow::apply_clear;
use crate::flows::common_steps::{self, store_of, APPLY_TO_CART, CLOSE_OVERLAY, RENDER_CART};
use crate::flows::contexts::{ActionCtxData, Effect};
use crate::pipeline::Pipeline;
use crate::registry::ActionRegistry;
use crate::view::Notice;
use std::sync::Arc;
use tracing::info;

pub fn register_checkout_pipeline(registry: &mut ActionRegistry) {
  let skip_when_closed: SkipCondition<ActionCtxData> = Arc::new(common_steps::overlay_closed);
  let mut p = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::Checkout.as_str(),
    &[
      ("require_items", false, None),
      ("confirm_purchase", false, None),
      (APPLY_TO_CART, false, None),
      (RENDER_CART, false, None),
      (CLOSE_OVERLAY, false, Some(skip_when_closed)),
    ],
  );

  p.on_root("require_items", require_items);
  p.on_root("confirm_purchase", confirm_purchase);
  p.on_root(APPLY_TO_CART, apply_clear);
  p.on_root(RENDER_CART, common_steps::render_cart);
  p.on_root(CLOSE_OVERLAY, common_steps::close_overlay);

  registry.register_pipeline(ActionKind::Checkout, p);
}

/// Empty cart: tell the user and stop without touching state.
fn require_items(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  if store_of(ctx_data).read().cart.is_empty() {
    info!("Checkout requested with an empty cart.");
    ctx_data.write().effects.push(Effect::Notify(Notice::CartEmpty));
    return Ok(PipelineControl::Stop);
  }
  Ok(PipelineControl::Continue)
}

fn confirm_purchase(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let totals = store_of(ctx_data).read().cart.totals();
  info!(items = totals.quantity, total = %totals.price, "Simulated purchase confirmed.");
  ctx_data
    .write()
    .effects
    .push(Effect::Notify(Notice::PurchaseConfirmed));
  Ok(PipelineControl::Continue)
}
