// storefront/src/catalog.rs

//! The fixed product catalog.

use crate::error::{StorefrontError, StorefrontResult};
use crate::money::Price;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Catalog identifier of a product. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
  pub const fn new(id: u32) -> Self {
    Self(id)
  }

  pub const fn get(self) -> u32 {
    self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<u32> for ProductId {
  fn from(id: u32) -> Self {
    Self(id)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: Price,
  pub image: String,
  pub description: String,
}

impl Product {
  pub fn new(
    id: u32,
    name: impl Into<String>,
    price: Price,
    image: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      id: ProductId(id),
      name: name.into(),
      price,
      image: image.into(),
      description: description.into(),
    }
  }
}

/// Immutable, ordered set of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  /// Builds a catalog, rejecting zero or duplicate ids.
  pub fn new(products: Vec<Product>) -> StorefrontResult<Self> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
      if product.id.get() == 0 {
        return Err(StorefrontError::InvalidCatalog(format!(
          "product '{}' has id 0; ids must be positive",
          product.name
        )));
      }
      if !seen.insert(product.id) {
        return Err(StorefrontError::InvalidCatalog(format!(
          "duplicate product id {}",
          product.id
        )));
      }
    }
    tracing::debug!(products = products.len(), "Catalog loaded.");
    Ok(Self { products })
  }

  /// The built-in storefront catalog.
  pub fn demo() -> Self {
    const IMAGE_BASE: &str = "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is";
    let products = vec![
      Product::new(
        1,
        "iPhone 15 Pro",
        Price::from_major(999),
        format!("{IMAGE_BASE}/iphone-15-pro-finish-select-202309-6-1inch-naturaltitanium?wid=512&hei=512&fmt=p-jpg&qlt=80&.v=1692845699233"),
        "The ultimate iPhone, powered by the A17 Pro chip.",
      ),
      Product::new(
        2,
        "iPhone 15",
        Price::from_major(799),
        format!("{IMAGE_BASE}/iphone-15-finish-select-202309-6-1inch-blue?wid=512&hei=512&fmt=p-jpg&qlt=80&.v=1692923777972"),
        "A total powerhouse with the Dynamic Island.",
      ),
      Product::new(
        3,
        "iPhone 14",
        Price::from_major(699),
        format!("{IMAGE_BASE}/iphone-14-finish-select-202209-6-1inch-yellow?wid=512&hei=512&fmt=p-jpg&qlt=80&.v=1676505838421"),
        "As amazing as ever, with a dual-camera system.",
      ),
      Product::new(
        4,
        "iPhone SE",
        Price::from_major(429),
        format!("{IMAGE_BASE}/iphone-se-finish-select-202209-6-1inch-product-red?wid=512&hei=512&fmt=p-jpg&qlt=80&.v=1661477492931"),
        "Serious power. Great value. A15 Bionic chip.",
      ),
    ];
    Self { products }
  }

  pub fn list_products(&self) -> &[Product] {
    &self.products
  }

  pub fn find(&self, id: ProductId) -> Option<&Product> {
    self.products.iter().find(|p| p.id == id)
  }

  pub fn contains(&self, id: ProductId) -> bool {
    self.find(id).is_some()
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }
}
