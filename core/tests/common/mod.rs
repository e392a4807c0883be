// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

use once_cell::sync::Lazy;
use storefront::{
  AddLabel, CartController, CartView, Catalog, CatalogView, ContextData, Notice, PipelineControl, ProductId,
  StorefrontError, Surface,
};
use tracing::Level;

// --- Recording surface ---

/// Everything the controller pushed to the surface, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
  Catalog(CatalogView),
  Cart(CartView),
  CartOpen(bool),
  Notice(Notice),
  AddLabel(ProductId, AddLabel),
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
  frames: Rc<RefCell<Vec<Frame>>>,
}

impl RecordingSurface {
  pub fn frames(&self) -> Vec<Frame> {
    self.frames.borrow().clone()
  }

  pub fn clear(&self) {
    self.frames.borrow_mut().clear();
  }

  pub fn cart_renders(&self) -> usize {
    self
      .frames
      .borrow()
      .iter()
      .filter(|f| matches!(f, Frame::Cart(_)))
      .count()
  }

  pub fn last_cart(&self) -> Option<CartView> {
    self.frames.borrow().iter().rev().find_map(|f| match f {
      Frame::Cart(view) => Some(view.clone()),
      _ => None,
    })
  }

  pub fn notices(&self) -> Vec<Notice> {
    self
      .frames
      .borrow()
      .iter()
      .filter_map(|f| match f {
        Frame::Notice(n) => Some(*n),
        _ => None,
      })
      .collect()
  }
}

impl Surface for RecordingSurface {
  fn show_catalog(&mut self, view: &CatalogView) {
    self.frames.borrow_mut().push(Frame::Catalog(view.clone()));
  }

  fn show_cart(&mut self, view: &CartView) {
    self.frames.borrow_mut().push(Frame::Cart(view.clone()));
  }

  fn set_cart_open(&mut self, open: bool) {
    self.frames.borrow_mut().push(Frame::CartOpen(open));
  }

  fn notify(&mut self, notice: Notice) {
    self.frames.borrow_mut().push(Frame::Notice(notice));
  }

  fn set_add_label(&mut self, id: ProductId, label: AddLabel) {
    self.frames.borrow_mut().push(Frame::AddLabel(id, label));
  }
}

/// A controller over the demo catalog plus a handle on what it rendered.
pub fn demo_controller() -> (CartController, RecordingSurface) {
  setup_tracing();
  let surface = RecordingSurface::default();
  let controller = CartController::new(Catalog::demo(), Box::new(surface.clone()));
  (controller, surface)
}

pub fn id(raw: u32) -> ProductId {
  ProductId::new(raw)
}

// --- Common Context and Error for engine tests ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Storefront error: {0}")]
  Storefront(String), // Stored as String for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<StorefrontError> for TestError {
  fn from(err: StorefrontError) -> Self {
    TestError::Storefront(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: &ContextData<TestContext>| {
    let mut guard = ctx.write();
    guard.counter += 1;
    guard.message.push_str(message_to_append);
    guard.steps_executed.push(step_name.to_string());
    tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}", guard.counter);
    if guard.should_stop_at.as_deref() == Some(step_name) {
      return Ok(PipelineControl::Stop);
    }
    Ok(PipelineControl::Continue)
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> storefront::Handler<TestContext, TestError> {
  Box::new(move |ctx: &ContextData<TestContext>| {
    ctx.write().steps_executed.push(step_name.to_string());
    tracing::warn!(target: "test_handlers", step = %step_name, "failing with: '{}'", error_message);
    Err(TestError::Handler(error_message.to_string()))
  })
}

// --- Helper for Tracing Setup ---

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counter for checking execution counts ---
pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
