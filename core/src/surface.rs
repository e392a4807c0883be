// storefront/src/surface.rs

//! The display surface the controller drives.

use crate::catalog::ProductId;
use crate::view::{AddLabel, CartView, CatalogView, Notice};

/// External view layer. Receives full view descriptions, never partial diffs.
///
/// Implementations decide layout and markup. The controller guarantees that
/// `show_cart` is called at most once per user action, with the complete
/// current cart.
pub trait Surface {
  fn show_catalog(&mut self, view: &CatalogView);

  fn show_cart(&mut self, view: &CartView);

  fn set_cart_open(&mut self, open: bool);

  fn notify(&mut self, notice: Notice);

  /// Cosmetic only. Has no effect on cart state.
  fn set_add_label(&mut self, id: ProductId, label: AddLabel);
}

/// Discards everything. Useful for headless runs and benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
  fn show_catalog(&mut self, _view: &CatalogView) {}
  fn show_cart(&mut self, _view: &CartView) {}
  fn set_cart_open(&mut self, _open: bool) {}
  fn notify(&mut self, _notice: Notice) {}
  fn set_add_label(&mut self, _id: ProductId, _label: AddLabel) {}
}
