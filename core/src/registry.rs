// storefront/src/registry.rs

//! Defines `ActionRegistry`, which maps each `ActionKind` to the pipeline that handles it.

use crate::action::ActionKind;
use crate::core::context_data::ContextData;
use crate::core::control::PipelineResult;
use crate::error::StorefrontError;
use crate::flows::contexts::ActionCtxData;
use crate::pipeline::Pipeline;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub type ActionPipeline = Pipeline<ActionCtxData, StorefrontError>;

/// Kind-keyed set of action pipelines.
#[derive(Default)]
pub struct ActionRegistry {
  pipelines: BTreeMap<ActionKind, Arc<ActionPipeline>>,
}

impl ActionRegistry {
  /// Creates an empty registry. See `flows::default_registry` for the full storefront set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `pipeline` for `kind`, replacing any previous one.
  pub fn register_pipeline(&mut self, kind: ActionKind, pipeline: ActionPipeline) {
    event!(Level::DEBUG, action = %kind, steps = ?pipeline.step_names(), "Registering action pipeline.");
    if self.pipelines.insert(kind, Arc::new(pipeline)).is_some() {
      event!(Level::DEBUG, action = %kind, "Replaced existing action pipeline.");
    }
  }

  pub fn pipeline(&self, kind: ActionKind) -> Option<&ActionPipeline> {
    self.pipelines.get(&kind).map(Arc::as_ref)
  }

  /// Pipeline for `kind`, for callers that want to extend a registered flow.
  /// Returns `None` if the pipeline is shared elsewhere or not registered.
  pub fn pipeline_mut(&mut self, kind: ActionKind) -> Option<&mut ActionPipeline> {
    self.pipelines.get_mut(&kind).and_then(Arc::get_mut)
  }

  pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
    self.pipelines.keys().copied()
  }

  /// Runs the pipeline registered for the context's action.
  #[instrument(name = "ActionRegistry::run", skip_all, err(Display))]
  pub fn run(&self, ctx_data: &ContextData<ActionCtxData>) -> Result<PipelineResult, StorefrontError> {
    let kind = ctx_data.read().action.kind();
    let pipeline = self.pipelines.get(&kind).ok_or_else(|| {
      event!(Level::ERROR, action = %kind, "No pipeline registered for action.");
      StorefrontError::ActionNotRegistered {
        action: kind.to_string(),
      }
    })?;
    pipeline.run(ctx_data)
  }
}
