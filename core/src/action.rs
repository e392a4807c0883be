// storefront/src/action.rs

//! User actions and the report returned after dispatching one.

use crate::cart::{Direction, LineChange};
use crate::catalog::ProductId;
use crate::core::control::PipelineResult;
use std::fmt;

/// Every interaction the storefront accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
  OpenCart,
  CloseCart,
  AddToCart(ProductId),
  UpdateQuantity(ProductId, Direction),
  RemoveFromCart(ProductId),
  ClearCart,
  Checkout,
}

/// Payload-free discriminant of `CartAction`, used to key the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
  OpenCart,
  CloseCart,
  AddToCart,
  UpdateQuantity,
  RemoveFromCart,
  ClearCart,
  Checkout,
}

impl ActionKind {
  pub const ALL: [ActionKind; 7] = [
    ActionKind::OpenCart,
    ActionKind::CloseCart,
    ActionKind::AddToCart,
    ActionKind::UpdateQuantity,
    ActionKind::RemoveFromCart,
    ActionKind::ClearCart,
    ActionKind::Checkout,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ActionKind::OpenCart => "open_cart",
      ActionKind::CloseCart => "close_cart",
      ActionKind::AddToCart => "add_to_cart",
      ActionKind::UpdateQuantity => "update_quantity",
      ActionKind::RemoveFromCart => "remove_from_cart",
      ActionKind::ClearCart => "clear_cart",
      ActionKind::Checkout => "checkout",
    }
  }
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl CartAction {
  pub fn kind(&self) -> ActionKind {
    match self {
      CartAction::OpenCart => ActionKind::OpenCart,
      CartAction::CloseCart => ActionKind::CloseCart,
      CartAction::AddToCart(_) => ActionKind::AddToCart,
      CartAction::UpdateQuantity(..) => ActionKind::UpdateQuantity,
      CartAction::RemoveFromCart(_) => ActionKind::RemoveFromCart,
      CartAction::ClearCart => ActionKind::ClearCart,
      CartAction::Checkout => ActionKind::Checkout,
    }
  }

  /// The product the action targets, if any.
  pub fn product_id(&self) -> Option<ProductId> {
    match self {
      CartAction::AddToCart(id) | CartAction::UpdateQuantity(id, _) | CartAction::RemoveFromCart(id) => Some(*id),
      _ => None,
    }
  }
}

impl fmt::Display for CartAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CartAction::UpdateQuantity(id, direction) => write!(f, "{}({id}, {direction})", self.kind()),
      other => match other.product_id() {
        Some(id) => write!(f, "{}({id})", other.kind()),
        None => write!(f, "{}", other.kind()),
      },
    }
  }
}

/// What happened when an action was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionReport {
  pub action: CartAction,
  /// `Stopped` means the action was a no-op.
  pub result: PipelineResult,
  pub change: Option<LineChange>,
  /// Number of cart renders the action produced. Never more than one.
  pub cart_renders: usize,
}

impl ActionReport {
  pub fn is_noop(&self) -> bool {
    self.result == PipelineResult::Stopped
  }
}
