// storefront/src/flows/overlay_flow.rs

use crate::action::ActionKind;
use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::core::step::SkipCondition;
use crate::error::{StorefrontError, StorefrontResult};
use crate::flows::common_steps::{self, store_of, CLOSE_OVERLAY};
use crate::flows::contexts::{ActionCtxData, Effect};
use crate::pipeline::Pipeline;
use crate::registry::ActionRegistry;
use std::sync::Arc;

pub fn register_overlay_pipelines(registry: &mut ActionRegistry) {
  let skip_when_open: SkipCondition<ActionCtxData> = Arc::new(overlay_open);
  let skip_when_closed: SkipCondition<ActionCtxData> = Arc::new(common_steps::overlay_closed);

  let mut open = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::OpenCart.as_str(),
    &[("open_overlay", false, Some(skip_when_open))],
  );
  open.on_root("open_overlay", open_overlay);
  registry.register_pipeline(ActionKind::OpenCart, open);

  let mut close = Pipeline::<ActionCtxData, StorefrontError>::new(
    ActionKind::CloseCart.as_str(),
    &[(CLOSE_OVERLAY, false, Some(skip_when_closed))],
  );
  close.on_root(CLOSE_OVERLAY, common_steps::close_overlay);
  registry.register_pipeline(ActionKind::CloseCart, close);
}

fn overlay_open(ctx_data: &ContextData<ActionCtxData>) -> bool {
  store_of(ctx_data).read().cart_open
}

fn open_overlay(ctx_data: &ContextData<ActionCtxData>) -> StorefrontResult<PipelineControl> {
  store_of(ctx_data).write().cart_open = true;
  ctx_data.write().effects.push(Effect::SetCartOpen(true));
  Ok(PipelineControl::Continue)
}
