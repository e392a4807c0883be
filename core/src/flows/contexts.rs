// storefront/src/flows/contexts.rs

//! Data the action pipelines operate on.
//! Handlers receive `ActionCtxData` wrapped in `ContextData`.

use crate::action::CartAction;
use crate::cart::{Cart, LineChange};
use crate::catalog::{Catalog, Product, ProductId};
use crate::core::context_data::ContextData;
use crate::view::{CartView, Notice};
use std::sync::Arc;

/// Session state owned by the `CartController`. Lives for the whole session.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
  pub cart: Cart,
  pub cart_open: bool,
}

/// Side effect an action asks the controller to apply to the surface once the
/// pipeline has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
  RenderCart(CartView),
  SetCartOpen(bool),
  Notify(Notice),
  FlashAddLabel(ProductId),
}

/// Per-dispatch context. Created fresh for every user action.
#[derive(Debug, Clone)]
pub struct ActionCtxData {
  pub action: CartAction,
  pub catalog: Arc<Catalog>,
  pub store: ContextData<StoreState>,
  /// Set by `resolve_product` for adds.
  pub product: Option<Product>,
  pub change: Option<LineChange>,
  pub effects: Vec<Effect>,
}

impl ActionCtxData {
  pub fn new(action: CartAction, catalog: Arc<Catalog>, store: ContextData<StoreState>) -> Self {
    Self {
      action,
      catalog,
      store,
      product: None,
      change: None,
      effects: Vec::new(),
    }
  }

  pub fn cart_renders(&self) -> usize {
    self
      .effects
      .iter()
      .filter(|e| matches!(e, Effect::RenderCart(_)))
      .count()
  }
}
