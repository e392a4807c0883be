// storefront/src/pipeline/hooks.rs

//! Methods for registering `before`, `on`, and `after` handlers for pipeline steps.

use tracing::{event, Level};

use crate::core::context::Handler;
use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::StorefrontError;
use crate::pipeline::definition::Pipeline;

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<StorefrontError> + Send + Sync + 'static,
{
  fn wrap_handler<UserProvidedErr>(
    handler_fn: impl Fn(&ContextData<TData>) -> Result<PipelineControl, UserProvidedErr> + Send + Sync + 'static,
  ) -> Handler<TData, Err>
  where
    UserProvidedErr: Into<Err> + 'static,
  {
    Box::new(move |ctx_data: &ContextData<TData>| handler_fn(ctx_data).map_err(Into::into))
  }

  /// Registers a `before` hook for a step.
  ///
  /// The handler may return any error type that converts into the pipeline's `Err`.
  pub fn before_root<UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&ContextData<TData>) -> Result<PipelineControl, UserProvidedErr> + Send + Sync + 'static,
  ) where
    UserProvidedErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .before
      .entry(step_name.to_string())
      .or_default()
      .push(Self::wrap_handler(handler_fn));
    event!(Level::TRACE, pipeline = %self.name, %step_name, "'before' handler registered.");
  }

  /// Registers an `on` hook for a step.
  pub fn on_root<UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&ContextData<TData>) -> Result<PipelineControl, UserProvidedErr> + Send + Sync + 'static,
  ) where
    UserProvidedErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .on
      .entry(step_name.to_string())
      .or_default()
      .push(Self::wrap_handler(handler_fn));
    event!(Level::TRACE, pipeline = %self.name, %step_name, "'on' handler registered.");
  }

  /// Registers an `after` hook for a step.
  pub fn after_root<UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(&ContextData<TData>) -> Result<PipelineControl, UserProvidedErr> + Send + Sync + 'static,
  ) where
    UserProvidedErr: Into<Err> + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .after
      .entry(step_name.to_string())
      .or_default()
      .push(Self::wrap_handler(handler_fn));
    event!(Level::TRACE, pipeline = %self.name, %step_name, "'after' handler registered.");
  }
}
