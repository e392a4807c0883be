// storefront/examples/checkout_session.rs

use storefront::{
  AddLabel, CartController, CartView, Catalog, CatalogView, Direction, Notice, ProductId, StorefrontResult, Surface,
};
use tracing::info;

/// Logs everything it is asked to show.
struct LogSurface;

impl Surface for LogSurface {
  fn show_catalog(&mut self, view: &CatalogView) {
    for card in &view.cards {
      info!("[catalog] #{} {} ${}", card.id, card.name, card.price);
    }
  }

  fn show_cart(&mut self, view: &CartView) {
    match view {
      CartView::Empty { message, .. } => info!("[cart] {}", message),
      CartView::Items { lines, totals } => {
        for line in lines {
          info!("[cart] {} x{} @ ${}", line.name, line.quantity, line.price);
        }
        info!("[cart] {} item(s), total ${}", totals.quantity, totals.price);
      }
    }
  }

  fn set_cart_open(&mut self, open: bool) {
    info!("[overlay] {}", if open { "open" } else { "closed" });
  }

  fn notify(&mut self, notice: Notice) {
    info!("[notice] {}", notice);
  }

  fn set_add_label(&mut self, id: ProductId, label: AddLabel) {
    info!("[card #{}] {}", id, label.text());
  }
}

fn main() -> StorefrontResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Checkout Session Example ---");

  let mut controller = CartController::new(Catalog::demo(), Box::new(LogSurface));
  controller.render_all();

  controller.open_cart()?;
  controller.add_to_cart(ProductId::new(1))?;
  controller.add_to_cart(ProductId::new(1))?;
  controller.add_to_cart(ProductId::new(2))?;
  controller.update_quantity(ProductId::new(1), Direction::Decrease)?;
  controller.update_quantity(ProductId::new(1), Direction::Decrease)?;

  let totals = controller.compute_totals();
  info!("Before checkout: {} item(s), ${}", totals.quantity, totals.display_price());

  controller.checkout()?;
  controller.checkout()?;

  Ok(())
}
