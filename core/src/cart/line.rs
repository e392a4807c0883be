// storefront/src/cart/line.rs

use crate::catalog::{Product, ProductId};
use crate::money::Price;
use serde::Serialize;

/// A product selected for purchase, copied by value from the catalog, with its quantity.
///
/// `quantity` is at least 1 whenever the line is observable in a `Cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
  pub id: ProductId,
  pub name: String,
  pub price: Price,
  pub image: String,
  pub description: String,
  pub quantity: u32,
}

impl CartLine {
  pub(crate) fn from_product(product: &Product) -> Self {
    Self {
      id: product.id,
      name: product.name.clone(),
      price: product.price,
      image: product.image.clone(),
      description: product.description.clone(),
      quantity: 1,
    }
  }

  pub fn subtotal(&self) -> Price {
    self.price * self.quantity
  }
}
