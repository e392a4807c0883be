// storefront/src/view.rs

//! Pure rendering: state in, display description out.
//!
//! Nothing here touches a display. The controller hands these descriptions to a
//! `Surface` implementation after every state change.

use crate::cart::{CartLine, Direction, Totals};
use crate::catalog::{Product, ProductId};
use crate::money::Price;
use serde::Serialize;
use std::fmt;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Text on a product card's add-to-cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddLabel {
  AddToCart,
  /// Shown briefly after a click, then reverted to `AddToCart`.
  Added,
}

impl AddLabel {
  pub fn text(self) -> &'static str {
    match self {
      AddLabel::AddToCart => "Add to Cart",
      AddLabel::Added => "Added!",
    }
  }
}

/// User-facing messages raised by actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
  PurchaseConfirmed,
  CartEmpty,
}

impl Notice {
  pub fn text(self) -> &'static str {
    match self {
      Notice::PurchaseConfirmed => "Thank you for your purchase! (This is a demo)",
      Notice::CartEmpty => "Your cart is empty!",
    }
  }
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.text())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
  pub id: ProductId,
  pub name: String,
  pub description: String,
  pub image: String,
  pub price: Price,
  pub add_label: AddLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
  pub cards: Vec<ProductCard>,
}

/// A quantity or removal control on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineControl {
  Quantity { id: ProductId, direction: Direction },
  Remove { id: ProductId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
  pub id: ProductId,
  pub name: String,
  pub image: String,
  pub price: Price,
  pub quantity: u32,
  pub controls: [LineControl; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalsView {
  /// Badge count on the cart icon.
  pub quantity: u64,
  pub price: Price,
}

impl From<Totals> for TotalsView {
  fn from(totals: Totals) -> Self {
    Self {
      quantity: totals.quantity,
      price: totals.price,
    }
  }
}

/// The cart overlay contents. An empty cart is its own state, not an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartView {
  Empty { message: &'static str, totals: TotalsView },
  Items { lines: Vec<LineView>, totals: TotalsView },
}

impl CartView {
  pub fn is_empty(&self) -> bool {
    matches!(self, CartView::Empty { .. })
  }

  pub fn totals(&self) -> TotalsView {
    match self {
      CartView::Empty { totals, .. } | CartView::Items { totals, .. } => *totals,
    }
  }

  pub fn lines(&self) -> &[LineView] {
    match self {
      CartView::Empty { .. } => &[],
      CartView::Items { lines, .. } => lines,
    }
  }
}

pub fn render_catalog(products: &[Product]) -> CatalogView {
  CatalogView {
    cards: products
      .iter()
      .map(|p| ProductCard {
        id: p.id,
        name: p.name.clone(),
        description: p.description.clone(),
        image: p.image.clone(),
        price: p.price,
        add_label: AddLabel::AddToCart,
      })
      .collect(),
  }
}

pub fn render_cart(lines: &[CartLine], totals: Totals) -> CartView {
  let totals = TotalsView::from(totals);
  if lines.is_empty() {
    return CartView::Empty {
      message: EMPTY_CART_MESSAGE,
      totals,
    };
  }
  CartView::Items {
    lines: lines
      .iter()
      .map(|line| LineView {
        id: line.id,
        name: line.name.clone(),
        image: line.image.clone(),
        price: line.price,
        quantity: line.quantity,
        controls: [
          LineControl::Quantity {
            id: line.id,
            direction: Direction::Decrease,
          },
          LineControl::Quantity {
            id: line.id,
            direction: Direction::Increase,
          },
          LineControl::Remove { id: line.id },
        ],
      })
      .collect(),
    totals,
  }
}
