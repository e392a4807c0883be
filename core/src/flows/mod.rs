// storefront/src/flows/mod.rs

//! Defines and registers the pipeline behind every storefront action.

pub mod cart_flow;
pub mod checkout_flow;
pub mod common_steps;
pub mod contexts;
pub mod overlay_flow;

use crate::registry::ActionRegistry;

/// Registers every storefront pipeline with `registry`.
pub fn register_all_flows(registry: &mut ActionRegistry) {
  tracing::debug!("Registering storefront action pipelines...");

  overlay_flow::register_overlay_pipelines(registry);
  cart_flow::register_add_to_cart_pipeline(registry);
  cart_flow::register_update_quantity_pipeline(registry);
  cart_flow::register_remove_from_cart_pipeline(registry);
  cart_flow::register_clear_cart_pipeline(registry);
  checkout_flow::register_checkout_pipeline(registry);
}

/// A registry holding the full storefront action set.
pub fn default_registry() -> ActionRegistry {
  let mut registry = ActionRegistry::new();
  register_all_flows(&mut registry);
  registry
}
