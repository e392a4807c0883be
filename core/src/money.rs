// storefront/src/money.rs

//! Exact, non-negative money amounts.
//!
//! Arithmetic saturates instead of overflowing.

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A price held as whole cents so repeated cart arithmetic never drifts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
  cents: u64,
}

impl Price {
  pub const ZERO: Price = Price { cents: 0 };

  pub const fn from_cents(cents: u64) -> Self {
    Self { cents }
  }

  /// Whole currency units, e.g. `Price::from_major(999)` is `999.00`.
  /// Saturates at `u64::MAX` cents.
  pub const fn from_major(units: u64) -> Self {
    Self {
      cents: units.saturating_mul(100),
    }
  }

  pub const fn cents(self) -> u64 {
    self.cents
  }
}

impl fmt::Display for Price {
  /// Always two decimals: `1998.00`, `4.05`.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
  }
}

impl Add for Price {
  type Output = Price;

  fn add(self, rhs: Price) -> Price {
    Price::from_cents(self.cents.saturating_add(rhs.cents))
  }
}

impl Mul<u32> for Price {
  type Output = Price;

  fn mul(self, quantity: u32) -> Price {
    Price::from_cents(self.cents.saturating_mul(u64::from(quantity)))
  }
}

impl Sum for Price {
  fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
    iter.fold(Price::ZERO, Add::add)
  }
}

// Serialized the way it is displayed, so view consumers never see raw cents.
impl Serialize for Price {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
