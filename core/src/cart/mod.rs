// storefront/src/cart/mod.rs

//! Cart state and the per-line state machine.
//!
//! A product id is either absent from the cart or present with quantity `n >= 1`:
//! - absent -> present(1) on add
//! - present(n) -> present(n + 1) on add or increase
//! - present(n) -> present(n - 1) on decrease when `n > 1`
//! - present(1) -> absent on decrease or remove
//!
//! Mutation is crate-private. Outside the crate the cart is read-only and only
//! the `CartController` changes it.

pub mod line;

pub use line::CartLine;

use crate::catalog::{Product, ProductId};
use crate::money::Price;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  Increase,
  Decrease,
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Direction::Increase => "increase",
      Direction::Decrease => "decrease",
    })
  }
}

impl FromStr for Direction {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "increase" | "inc" | "+" => Ok(Direction::Increase),
      "decrease" | "dec" | "-" => Ok(Direction::Decrease),
      other => Err(format!("unknown quantity direction '{other}'")),
    }
  }
}

/// What a quantity change did to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
  Added { quantity: u32 },
  Updated { quantity: u32 },
  Removed,
  Missing,
}

/// Item count and exact total price of the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
  pub quantity: u64,
  pub price: Price,
}

impl Totals {
  /// Total price rounded to two decimals for display.
  pub fn display_price(&self) -> String {
    self.price.to_string()
  }
}

/// Ordered cart lines, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn line(&self, id: ProductId) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.id == id)
  }

  pub fn contains(&self, id: ProductId) -> bool {
    self.line(id).is_some()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn totals(&self) -> Totals {
    Totals {
      quantity: self.lines.iter().map(|l| u64::from(l.quantity)).sum(),
      price: self.lines.iter().map(CartLine::subtotal).sum(),
    }
  }

  fn position(&self, id: ProductId) -> Option<usize> {
    self.lines.iter().position(|l| l.id == id)
  }

  /// Increments the existing line for the product, or appends a new line with quantity 1.
  pub(crate) fn add(&mut self, product: &Product) -> LineChange {
    match self.position(product.id) {
      Some(idx) => {
        let line = &mut self.lines[idx];
        line.quantity = line.quantity.saturating_add(1);
        LineChange::Updated {
          quantity: line.quantity,
        }
      }
      None => {
        self.lines.push(CartLine::from_product(product));
        LineChange::Added { quantity: 1 }
      }
    }
  }

  /// Applies one quantity step. A decrease that would reach zero removes the line.
  pub(crate) fn step_quantity(&mut self, id: ProductId, direction: Direction) -> LineChange {
    let Some(idx) = self.position(id) else {
      return LineChange::Missing;
    };
    let quantity = self.lines[idx].quantity;
    match direction {
      Direction::Increase => {
        let quantity = quantity.saturating_add(1);
        self.lines[idx].quantity = quantity;
        LineChange::Updated { quantity }
      }
      Direction::Decrease if quantity > 1 => {
        self.lines[idx].quantity = quantity - 1;
        LineChange::Updated { quantity: quantity - 1 }
      }
      Direction::Decrease => {
        self.lines.remove(idx);
        LineChange::Removed
      }
    }
  }

  pub(crate) fn remove(&mut self, id: ProductId) -> LineChange {
    match self.position(id) {
      Some(idx) => {
        self.lines.remove(idx);
        LineChange::Removed
      }
      None => LineChange::Missing,
    }
  }

  pub(crate) fn clear(&mut self) -> usize {
    let removed = self.lines.len();
    self.lines.clear();
    removed
  }

  /// Checks the cart invariants: unique ids and positive quantities.
  pub fn is_consistent(&self) -> bool {
    let unique = self
      .lines
      .iter()
      .enumerate()
      .all(|(i, a)| self.lines[i + 1..].iter().all(|b| b.id != a.id));
    unique && self.lines.iter().all(|l| l.quantity >= 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::Catalog;

  fn product(id: u32) -> Product {
    Catalog::demo()
      .find(ProductId::new(id))
      .cloned()
      .expect("demo product")
  }

  #[test]
  fn add_twice_keeps_one_line() {
    let mut cart = Cart::new();
    assert_eq!(cart.add(&product(1)), LineChange::Added { quantity: 1 });
    assert_eq!(cart.add(&product(1)), LineChange::Updated { quantity: 2 });
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
  }

  #[test]
  fn quantity_saturates_at_the_top() {
    let mut cart = Cart::new();
    cart.add(&product(2));
    cart.lines[0].quantity = u32::MAX;
    assert_eq!(cart.add(&product(2)), LineChange::Updated { quantity: u32::MAX });
    assert_eq!(
      cart.step_quantity(ProductId::new(2), Direction::Increase),
      LineChange::Updated { quantity: u32::MAX }
    );
    assert!(cart.is_consistent());
  }

  #[test]
  fn lines_keep_first_insertion_order() {
    let mut cart = Cart::new();
    cart.add(&product(3));
    cart.add(&product(1));
    cart.add(&product(3));
    let ids: Vec<u32> = cart.lines().iter().map(|l| l.id.get()).collect();
    assert_eq!(ids, vec![3, 1]);
  }

  #[test]
  fn decrease_from_one_removes_line() {
    let mut cart = Cart::new();
    cart.add(&product(2));
    assert_eq!(cart.step_quantity(ProductId::new(2), Direction::Decrease), LineChange::Removed);
    assert!(!cart.contains(ProductId::new(2)));
    assert_eq!(
      cart.step_quantity(ProductId::new(2), Direction::Increase),
      LineChange::Missing
    );
  }

  #[test]
  fn direction_parses_aliases() {
    assert_eq!("inc".parse::<Direction>(), Ok(Direction::Increase));
    assert_eq!("-".parse::<Direction>(), Ok(Direction::Decrease));
    assert!("sideways".parse::<Direction>().is_err());
  }
}
