// storefront/src/core/context.rs

//! Defines the `Handler<TData, Err>` type for pipeline step handlers.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;

/// A pipeline step handler.
///
/// Handlers run synchronously and to completion on the thread that dispatched
/// the action. A handler:
/// 1. Locks the `ContextData` (`.read()` or `.write()`) to reach the action state.
/// 2. Drops its guards before returning.
/// 3. Returns `PipelineControl::Continue` to proceed or `PipelineControl::Stop` to end the action early.
pub type Handler<TData, Err> =
  Box<dyn Fn(&ContextData<TData>) -> Result<PipelineControl, Err> + Send + Sync + 'static>;
