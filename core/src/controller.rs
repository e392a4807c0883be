// storefront/src/controller.rs

//! The `CartController`: the only owner of cart state.

use crate::action::{ActionReport, CartAction};
use crate::cart::{Cart, Direction, Totals};
use crate::catalog::{Catalog, ProductId};
use crate::core::context_data::ContextData;
use crate::error::{StorefrontError, StorefrontResult};
use crate::flows::{
  self,
  contexts::{ActionCtxData, Effect, StoreState},
};
use crate::registry::ActionRegistry;
use crate::surface::Surface;
use crate::view::{self, AddLabel};
use std::sync::Arc;
use tracing::{error, info, info_span};

/// Owns the cart for one session and drives a `Surface`.
///
/// Every user action goes through `dispatch`, which runs the action's pipeline
/// to completion and then applies the resulting effects to the surface. An
/// action either fully succeeds or changes nothing, and it re-renders the cart
/// at most once.
pub struct CartController {
  catalog: Arc<Catalog>,
  store: ContextData<StoreState>,
  registry: ActionRegistry,
  surface: Box<dyn Surface>,
}

impl CartController {
  pub fn new(catalog: Catalog, surface: Box<dyn Surface>) -> Self {
    Self::with_registry(catalog, surface, flows::default_registry())
  }

  /// Uses a caller-supplied registry, e.g. one with extra steps inserted.
  pub fn with_registry(catalog: Catalog, surface: Box<dyn Surface>, registry: ActionRegistry) -> Self {
    Self {
      catalog: Arc::new(catalog),
      store: ContextData::new(StoreState::default()),
      registry,
      surface,
    }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  /// A copy of the current cart.
  pub fn cart(&self) -> Cart {
    self.store.read().cart.clone()
  }

  pub fn is_cart_open(&self) -> bool {
    self.store.read().cart_open
  }

  pub fn compute_totals(&self) -> Totals {
    self.store.read().cart.totals()
  }

  /// Initial paint: the product grid and the (empty) cart.
  pub fn render_all(&mut self) {
    let catalog_view = view::render_catalog(self.catalog.list_products());
    let cart_view = {
      let guard = self.store.read();
      view::render_cart(guard.cart.lines(), guard.cart.totals())
    };
    self.surface.show_catalog(&catalog_view);
    self.surface.show_cart(&cart_view);
  }

  pub fn open_cart(&mut self) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::OpenCart)
  }

  pub fn close_cart(&mut self) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::CloseCart)
  }

  pub fn add_to_cart(&mut self, product_id: ProductId) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::AddToCart(product_id))
  }

  pub fn update_quantity(&mut self, product_id: ProductId, direction: Direction) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::UpdateQuantity(product_id, direction))
  }

  pub fn remove_from_cart(&mut self, product_id: ProductId) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::RemoveFromCart(product_id))
  }

  pub fn clear_cart(&mut self) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::ClearCart)
  }

  pub fn checkout(&mut self) -> StorefrontResult<ActionReport> {
    self.dispatch(CartAction::Checkout)
  }

  /// Reverts a card's add-to-cart label after the cosmetic flash.
  pub fn restore_add_label(&mut self, product_id: ProductId) {
    self.surface.set_add_label(product_id, AddLabel::AddToCart);
  }

  /// Runs one action to completion.
  ///
  /// No-ops come back as `Ok` with a `Stopped` result. `Err` is reserved for
  /// invariant violations such as an unknown product id. On `Err` the session
  /// state is restored to what it was before the action and nothing reaches
  /// the surface.
  pub fn dispatch(&mut self, action: CartAction) -> StorefrontResult<ActionReport> {
    let span = info_span!("dispatch", %action);
    let _span_guard = span.enter();

    let snapshot = self.store.read().clone();
    let ctx_data = ContextData::new(ActionCtxData::new(action, self.catalog.clone(), self.store.clone()));
    let result = match self.registry.run(&ctx_data) {
      Ok(result) => result,
      Err(e) => {
        error!(error = %e, "Action failed, session state restored.");
        self.restore(snapshot);
        return Err(e);
      }
    };

    let cart_renders = ctx_data.read().cart_renders();
    if cart_renders > 1 {
      error!(cart_renders, "Action rendered the cart more than once, session state restored.");
      self.restore(snapshot);
      return Err(StorefrontError::Internal(format!(
        "{action} produced {cart_renders} cart renders"
      )));
    }

    let (effects, change) = {
      let mut guard = ctx_data.write();
      (std::mem::take(&mut guard.effects), guard.change)
    };
    for effect in effects {
      self.apply_effect(effect);
    }

    info!(?result, ?change, cart_renders, "Action finished.");
    Ok(ActionReport {
      action,
      result,
      change,
      cart_renders,
    })
  }

  fn restore(&mut self, snapshot: StoreState) {
    *self.store.write() = snapshot;
  }

  fn apply_effect(&mut self, effect: Effect) {
    match effect {
      Effect::RenderCart(cart_view) => self.surface.show_cart(&cart_view),
      Effect::SetCartOpen(open) => self.surface.set_cart_open(open),
      Effect::Notify(notice) => self.surface.notify(notice),
      Effect::FlashAddLabel(product_id) => self.surface.set_add_label(product_id, AddLabel::Added),
    }
  }
}
