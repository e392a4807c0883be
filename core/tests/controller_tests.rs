// tests/controller_tests.rs
mod common;

use common::*;
use storefront::flows::contexts::ActionCtxData;
use storefront::flows::{common_steps, default_registry};
use storefront::{
  ActionKind, ActionRegistry, AddLabel, CartAction, CartController, CartView, Catalog, ContextData, Direction,
  LineChange, Notice, PipelineControl, PipelineResult, StorefrontError,
};

#[test]
fn test_adding_same_product_twice_yields_one_line() {
  let (mut controller, _surface) = demo_controller();
  controller.add_to_cart(id(1)).unwrap();
  let report = controller.add_to_cart(id(1)).unwrap();

  assert_eq!(report.change, Some(LineChange::Updated { quantity: 2 }));
  let cart = controller.cart();
  assert_eq!(cart.len(), 1);
  assert_eq!(cart.lines()[0].quantity, 2);
}

#[test]
fn test_worked_example_totals() {
  let (mut controller, _surface) = demo_controller();

  controller.add_to_cart(id(1)).unwrap();
  let totals = controller.compute_totals();
  assert_eq!((totals.quantity, totals.display_price()), (1, "999.00".to_string()));

  controller.add_to_cart(id(1)).unwrap();
  let totals = controller.compute_totals();
  assert_eq!(controller.cart().line(id(1)).map(|l| l.quantity), Some(2));
  assert_eq!(totals.display_price(), "1998.00");

  controller.add_to_cart(id(2)).unwrap();
  let totals = controller.compute_totals();
  assert_eq!((totals.quantity, totals.display_price()), (3, "2797.00".to_string()));

  controller.update_quantity(id(1), Direction::Decrease).unwrap();
  controller.update_quantity(id(1), Direction::Decrease).unwrap();
  let totals = controller.compute_totals();
  assert!(!controller.cart().contains(id(1)));
  assert_eq!((totals.quantity, totals.display_price()), (1, "799.00".to_string()));
}

#[test]
fn test_decrease_to_zero_removes_line_and_renders_once() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(3)).unwrap();
  surface.clear();

  let report = controller.update_quantity(id(3), Direction::Decrease).unwrap();

  assert_eq!(report.change, Some(LineChange::Removed));
  assert_eq!(report.cart_renders, 1);
  assert_eq!(surface.cart_renders(), 1);
  assert!(controller.cart().is_empty());
  assert!(surface.last_cart().map(|v| v.is_empty()).unwrap_or(false));
}

#[test]
fn test_update_missing_line_is_silent_noop() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(2)).unwrap();
  let before = controller.cart();
  surface.clear();

  let report = controller.update_quantity(id(4), Direction::Increase).unwrap();

  assert!(report.is_noop());
  assert_eq!(report.change, Some(LineChange::Missing));
  assert_eq!(controller.cart(), before);
  assert!(surface.frames().is_empty());
}

#[test]
fn test_increase_increments_quantity() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(4)).unwrap();
  controller.update_quantity(id(4), Direction::Increase).unwrap();

  assert_eq!(controller.cart().line(id(4)).map(|l| l.quantity), Some(2));
  match surface.last_cart() {
    Some(CartView::Items { lines, totals }) => {
      assert_eq!(lines[0].quantity, 2);
      assert_eq!(totals.price.to_string(), "858.00");
    }
    other => panic!("Expected cart items, got {:?}", other),
  }
}

#[test]
fn test_remove_nonexistent_id_leaves_cart_unchanged() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(1)).unwrap();
  let before = controller.cart();
  surface.clear();

  let report = controller.remove_from_cart(id(2)).unwrap();
  let again = controller.remove_from_cart(id(2)).unwrap();

  assert_eq!(report.change, Some(LineChange::Missing));
  assert_eq!(again.change, Some(LineChange::Missing));
  assert_eq!(controller.cart(), before);
  // Remove always re-renders, once per call.
  assert_eq!(surface.cart_renders(), 2);
}

#[test]
fn test_remove_existing_line() {
  let (mut controller, _surface) = demo_controller();
  controller.add_to_cart(id(1)).unwrap();
  controller.add_to_cart(id(2)).unwrap();

  let report = controller.remove_from_cart(id(1)).unwrap();

  assert_eq!(report.change, Some(LineChange::Removed));
  let ids: Vec<u32> = controller.cart().lines().iter().map(|l| l.id.get()).collect();
  assert_eq!(ids, vec![2]);
}

#[test]
fn test_checkout_non_empty_cart_clears_and_shows_empty_state() {
  let (mut controller, surface) = demo_controller();
  controller.open_cart().unwrap();
  controller.add_to_cart(id(1)).unwrap();
  controller.add_to_cart(id(2)).unwrap();
  surface.clear();

  let report = controller.checkout().unwrap();

  assert_eq!(report.result, PipelineResult::Completed);
  assert_eq!(report.cart_renders, 1);
  assert!(controller.cart().is_empty());
  assert!(!controller.is_cart_open());
  assert_eq!(
    surface.frames(),
    vec![
      Frame::Notice(Notice::PurchaseConfirmed),
      Frame::Cart(storefront::render_cart(&[], Default::default())),
      Frame::CartOpen(false),
    ]
  );
}

#[test]
fn test_checkout_with_closed_overlay_skips_close() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(1)).unwrap();
  surface.clear();

  controller.checkout().unwrap();

  assert!(!surface.frames().contains(&Frame::CartOpen(false)));
  assert_eq!(surface.cart_renders(), 1);
}

#[test]
fn test_checkout_empty_cart_only_notifies() {
  let (mut controller, surface) = demo_controller();
  controller.open_cart().unwrap();
  surface.clear();

  let report = controller.checkout().unwrap();

  assert!(report.is_noop());
  assert_eq!(report.cart_renders, 0);
  assert!(controller.cart().is_empty());
  assert!(controller.is_cart_open());
  assert_eq!(surface.frames(), vec![Frame::Notice(Notice::CartEmpty)]);
}

#[test]
fn test_unknown_product_is_an_error_and_changes_nothing() {
  let (mut controller, surface) = demo_controller();
  surface.clear();

  let result = controller.add_to_cart(id(42));

  match result {
    Err(StorefrontError::UnknownProduct { product_id }) => assert_eq!(product_id, id(42)),
    other => panic!("Expected UnknownProduct, got {:?}", other),
  }
  assert!(controller.cart().is_empty());
  assert!(surface.frames().is_empty());
}

#[test]
fn test_add_flashes_label_after_render() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(2)).unwrap();
  controller.restore_add_label(id(2));

  let frames = surface.frames();
  assert!(matches!(frames[0], Frame::Cart(_)));
  assert_eq!(
    &frames[1..],
    &[
      Frame::AddLabel(id(2), AddLabel::Added),
      Frame::AddLabel(id(2), AddLabel::AddToCart),
    ]
  );
}

#[test]
fn test_open_and_close_cart_toggle_overlay() {
  let (mut controller, surface) = demo_controller();

  controller.open_cart().unwrap();
  controller.open_cart().unwrap();
  assert!(controller.is_cart_open());
  controller.close_cart().unwrap();
  assert!(!controller.is_cart_open());
  controller.close_cart().unwrap();

  // Redundant toggles are skipped and produce nothing.
  assert_eq!(surface.frames(), vec![Frame::CartOpen(true), Frame::CartOpen(false)]);
  assert_eq!(surface.cart_renders(), 0);
}

#[test]
fn test_clear_cart_renders_empty_state_once() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(1)).unwrap();
  controller.add_to_cart(id(3)).unwrap();
  surface.clear();

  let report = controller.clear_cart().unwrap();

  assert_eq!(report.action, CartAction::ClearCart);
  assert_eq!(report.action.kind(), ActionKind::ClearCart);
  assert_eq!(surface.cart_renders(), 1);
  assert!(controller.cart().is_empty());
  assert!(surface.last_cart().map(|v| v.is_empty()).unwrap_or(false));
}

#[test]
fn test_render_all_paints_catalog_and_empty_cart() {
  let (mut controller, surface) = demo_controller();
  controller.render_all();

  let frames = surface.frames();
  assert_eq!(frames.len(), 2);
  match &frames[0] {
    Frame::Catalog(view) => assert_eq!(view.cards.len(), 4),
    other => panic!("Expected catalog frame, got {:?}", other),
  }
  assert!(matches!(&frames[1], Frame::Cart(view) if view.is_empty()));
}

#[test]
fn test_cart_view_serializes_with_state_tag() {
  let (mut controller, surface) = demo_controller();
  controller.add_to_cart(id(1)).unwrap();

  let json = serde_json::to_value(surface.last_cart().unwrap()).unwrap();
  assert_eq!(json["state"], "items");
  assert_eq!(json["totals"]["price"], "999.00");
  assert_eq!(json["lines"][0]["id"], 1);

  let empty = serde_json::to_value(storefront::render_cart(&[], Default::default())).unwrap();
  assert_eq!(empty["state"], "empty");
  assert_eq!(empty["message"], "Your cart is empty.");
}

// --- Failed actions leave the session untouched ---

fn controller_with(registry: ActionRegistry) -> (CartController, RecordingSurface) {
  setup_tracing();
  let surface = RecordingSurface::default();
  let controller = CartController::with_registry(Catalog::demo(), Box::new(surface.clone()), registry);
  (controller, surface)
}

fn failing_step(_ctx: &ContextData<ActionCtxData>) -> Result<PipelineControl, StorefrontError> {
  Err(StorefrontError::Internal("audit log unavailable".to_string()))
}

#[test]
fn test_error_after_cart_change_restores_state_and_renders_nothing() {
  let mut registry = default_registry();
  let add = registry.pipeline_mut(ActionKind::AddToCart).unwrap();
  add.insert_after_step("apply_to_cart", "audit", false, None);
  add.on_root("audit", failing_step);
  let (mut controller, surface) = controller_with(registry);

  controller.open_cart().unwrap();
  surface.clear();
  let before = controller.cart();

  let result = controller.add_to_cart(id(1));

  assert!(matches!(result, Err(StorefrontError::Internal(_))));
  assert_eq!(controller.cart(), before);
  assert!(controller.cart().is_empty());
  assert!(controller.is_cart_open());
  assert!(surface.frames().is_empty());
}

#[test]
fn test_double_render_is_rejected_and_state_restored() {
  let mut registry = default_registry();
  let remove = registry.pipeline_mut(ActionKind::RemoveFromCart).unwrap();
  remove.insert_after_step("render_cart", "render_again", false, None);
  remove.on_root("render_again", common_steps::render_cart);
  let (mut controller, surface) = controller_with(registry);

  controller.add_to_cart(id(2)).unwrap();
  controller.add_to_cart(id(2)).unwrap();
  surface.clear();
  let before = controller.cart();

  let result = controller.remove_from_cart(id(2));

  match result {
    Err(StorefrontError::Internal(msg)) => assert!(msg.contains("2 cart renders")),
    other => panic!("Expected Internal render error, got {:?}", other),
  }
  assert_eq!(controller.cart(), before);
  assert_eq!(controller.cart().lines()[0].quantity, 2);
  assert!(surface.frames().is_empty());
}

#[test]
fn test_failed_checkout_keeps_cart_and_overlay() {
  let mut registry = default_registry();
  let checkout = registry.pipeline_mut(ActionKind::Checkout).unwrap();
  checkout.insert_after_step("render_cart", "audit", false, None);
  checkout.on_root("audit", failing_step);
  let (mut controller, surface) = controller_with(registry);

  controller.add_to_cart(id(3)).unwrap();
  controller.open_cart().unwrap();
  surface.clear();
  let before = controller.cart();

  assert!(controller.checkout().is_err());

  assert_eq!(controller.cart(), before);
  assert!(controller.is_cart_open());
  assert!(surface.notices().is_empty());
  assert!(surface.frames().is_empty());

  // The session keeps working after the failure.
  controller.add_to_cart(id(4)).unwrap();
  assert_eq!(controller.cart().len(), 2);
  assert_eq!(surface.cart_renders(), 1);
}
