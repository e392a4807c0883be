// storefront/src/flows/cart_flow.rs

//! Pipelines for add, quantity update, remove and clear.
//!
//! Each pipeline mutates the cart in `apply_to_cart` and then renders exactly
//! once in `render_cart`. A no-op stops the pipeline before it renders.

use crate::action::{ActionKind, CartAction};
use crate::cart::LineChange;
use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::{StorefrontError, StorefrontResult};
use crate::flows::common_steps::{self, store_of, APPLY_TO_CART, RENDER_CART};
use crate::flows::contexts::{ActionCtxData, Effect};
use crate::pipeline::Pipeline;
use crate::registry::ActionRegistry;
use tracing::{debug, error, info};

fn unexpected_action(step: &str, action: CartAction) -> StorefrontError {
  StorefrontError::Internal(format!("step '{step}' cannot handle action {action}"))
}

// --- add_to_cart ---

pub fn register_add_to_cart_pipeline(registry: &mut ActionRegistry) {
  let mut p = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::AddToCart.as_str(),
    &[
      ("resolve_product", false, None),
      (APPLY_TO_CART, false, None),
      (RENDER_CART, false, None),
      ("flash_add_label", true, None),
    ],
  );

  p.on_root("resolve_product", resolve_product);
  p.on_root(APPLY_TO_CART, apply_add);
  p.after_root(APPLY_TO_CART, common_steps::verify_cart);
  p.on_root(RENDER_CART, common_steps::render_cart);
  p.on_root("flash_add_label", flash_add_label);

  registry.register_pipeline(ActionKind::AddToCart, p);
}

/// Looks the product up in the catalog. A miss is an invariant violation, not a no-op.
fn resolve_product(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let (action, catalog) = {
    let guard = ctx_data.read();
    (guard.action, guard.catalog.clone())
  };
  let CartAction::AddToCart(product_id) = action else {
    return Err(unexpected_action("resolve_product", action));
  };

  match catalog.find(product_id) {
    Some(product) => {
      ctx_data.write().product = Some(product.clone());
      Ok(PipelineControl::Continue)
    }
    None => {
      error!(%product_id, "Add requested for a product that is not in the catalog.");
      Err(StorefrontError::UnknownProduct { product_id })
    }
  }
}

fn apply_add(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let product = ctx_data
    .read()
    .product
    .clone()
    .ok_or_else(|| StorefrontError::Internal("apply_to_cart ran before resolve_product".to_string()))?;

  let change = store_of(ctx_data).write().cart.add(&product);
  info!(product_id = %product.id, ?change, "Product added to cart.");
  ctx_data.write().change = Some(change);
  Ok(PipelineControl::Continue)
}

fn flash_add_label(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let mut guard = ctx_data.write();
  if let Some(product_id) = guard.action.product_id() {
    guard.effects.push(Effect::FlashAddLabel(product_id));
  }
  Ok(PipelineControl::Continue)
}

// --- update_quantity ---

pub fn register_update_quantity_pipeline(registry: &mut ActionRegistry) {
  let mut p = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::UpdateQuantity.as_str(),
    &[
      ("locate_line", false, None),
      (APPLY_TO_CART, false, None),
      (RENDER_CART, false, None),
    ],
  );

  p.on_root("locate_line", locate_line);
  p.on_root(APPLY_TO_CART, apply_quantity_step);
  p.after_root(APPLY_TO_CART, common_steps::verify_cart);
  p.on_root(RENDER_CART, common_steps::render_cart);

  registry.register_pipeline(ActionKind::UpdateQuantity, p);
}

/// Stops the action when the product has no line in the cart.
fn locate_line(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let action = ctx_data.read().action;
  let CartAction::UpdateQuantity(product_id, _) = action else {
    return Err(unexpected_action("locate_line", action));
  };

  if store_of(ctx_data).read().cart.contains(product_id) {
    Ok(PipelineControl::Continue)
  } else {
    debug!(%product_id, "No cart line to update; ignoring.");
    ctx_data.write().change = Some(LineChange::Missing);
    Ok(PipelineControl::Stop)
  }
}

/// Decrement-to-zero removes the line here, so the action still renders only once.
fn apply_quantity_step(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let action = ctx_data.read().action;
  let CartAction::UpdateQuantity(product_id, direction) = action else {
    return Err(unexpected_action(APPLY_TO_CART, action));
  };

  let change = store_of(ctx_data).write().cart.step_quantity(product_id, direction);
  info!(%product_id, %direction, ?change, "Cart line quantity changed.");
  ctx_data.write().change = Some(change);
  Ok(PipelineControl::Continue)
}

// --- remove_from_cart ---

pub fn register_remove_from_cart_pipeline(registry: &mut ActionRegistry) {
  let mut p = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::RemoveFromCart.as_str(),
    &[(APPLY_TO_CART, false, None), (RENDER_CART, false, None)],
  );

  p.on_root(APPLY_TO_CART, apply_remove);
  p.after_root(APPLY_TO_CART, common_steps::verify_cart);
  p.on_root(RENDER_CART, common_steps::render_cart);

  registry.register_pipeline(ActionKind::RemoveFromCart, p);
}

/// Removing an id that is not in the cart changes nothing but still re-renders.
fn apply_remove(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let action = ctx_data.read().action;
  let CartAction::RemoveFromCart(product_id) = action else {
    return Err(unexpected_action(APPLY_TO_CART, action));
  };

  let change = store_of(ctx_data).write().cart.remove(product_id);
  info!(%product_id, ?change, "Cart line removed.");
  ctx_data.write().change = Some(change);
  Ok(PipelineControl::Continue)
}

// --- clear_cart ---

pub fn register_clear_cart_pipeline(registry: &mut ActionRegistry) {
  let mut p = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::ClearCart.as_str(),
    &[(APPLY_TO_CART, false, None), (RENDER_CART, false, None)],
  );

  p.on_root(APPLY_TO_CART, apply_clear);
  p.on_root(RENDER_CART, common_steps::render_cart);

  registry.register_pipeline(ActionKind::ClearCart, p);
}

pub(crate) fn apply_clear(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  let removed = store_of(ctx_data).write().cart.clear();
  info!(lines_removed = removed, "Cart cleared.");
  Ok(PipelineControl::Continue)
}
