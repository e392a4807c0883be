// storefront/src/lib.rs

//! Storefront: a type-safe cart core for a fixed-catalog storefront widget.
//!
//! The crate provides:
//!  - An immutable `Catalog` of products with exact `Price`s.
//!  - A `Cart` whose lines follow a small state machine (absent, present(n)).
//!  - A `CartController` that owns the cart for a session and runs every user
//!    action through a named-step `Pipeline` (resolve, apply, render, ...).
//!  - Pure view functions (`render_catalog`, `render_cart`) that turn state
//!    into display descriptions for a `Surface`.

pub mod action;
pub mod cart;
pub mod catalog;
pub mod controller;
pub mod core;
pub mod error;
pub mod flows;
pub mod money;
pub mod pipeline;
pub mod registry;
pub mod surface;
pub mod view;

// --- Re-exports for the Public API ---

pub use crate::action::{ActionKind, ActionReport, CartAction};
pub use crate::cart::{Cart, CartLine, Direction, LineChange, Totals};
pub use crate::catalog::{Catalog, Product, ProductId};
pub use crate::controller::CartController;
pub use crate::money::Price;
pub use crate::surface::{NullSurface, Surface};
pub use crate::view::{render_cart, render_catalog, AddLabel, CartView, CatalogView, Notice};

// Pipeline engine.
pub use crate::core::context::Handler;
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};
pub use crate::pipeline::Pipeline;
pub use crate::registry::ActionRegistry;

pub use crate::error::{StorefrontError, StorefrontResult};

/*
    Action flow:
    1. A `Surface` implementation receives views. The controller never renders markup itself.
    2. `CartController::new(Catalog::demo(), Box::new(surface))` builds the default registry.
    3. Each user action (`add_to_cart`, `update_quantity`, ...) becomes a `CartAction`
       and is dispatched to the pipeline registered for its `ActionKind`.
    4. Handlers mutate the session `StoreState` and push `Effect`s onto the action context.
    5. After the pipeline returns, the controller applies the effects to the surface in order.
*/
