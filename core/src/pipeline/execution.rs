// storefront/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, which executes the steps and their handlers in order.

use crate::core::context::Handler;
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::error::StorefrontError;
use crate::pipeline::definition::Pipeline;
use std::collections::HashMap;
use tracing::{event, instrument, span, Level};

/// Outcome of running one phase (`before`, `on` or `after`) of a step.
enum PhaseOutcome {
  Ran,
  Empty,
  Stopped,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<StorefrontError> + Send + Sync + 'static,
{
  /// Executes the pipeline against `ctx_data`.
  ///
  /// Steps run in definition order. For each step, `before`, `on`, then `after`
  /// handlers run in registration order. The first `PipelineControl::Stop` ends
  /// the run with `PipelineResult::Stopped`. The first error is returned as-is.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline = %self.name,
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub fn run(&self, ctx_data: &ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      let step_span = span!(
        Level::DEBUG,
        "pipeline_step",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );
      let _step_span_guard = step_span.enter();

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(ctx_data) {
          event!(Level::DEBUG, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let mut ran_any = false;
      for (phase, handlers) in [("before", &self.before), ("on", &self.on), ("after", &self.after)] {
        match Self::run_phase(phase, step_name, handlers, ctx_data)? {
          PhaseOutcome::Ran => ran_any = true,
          PhaseOutcome::Empty => {}
          PhaseOutcome::Stopped => {
            event!(Level::DEBUG, %phase, "Pipeline stopped by a handler.");
            return Ok(PipelineResult::Stopped);
          }
        }
      }

      if !ran_any {
        if step_def.optional {
          event!(Level::TRACE, "Optional step has no handlers, skipped.");
        } else {
          event!(Level::ERROR, "Non-optional step has no handlers.");
          return Err(Err::from(StorefrontError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }

  fn run_phase(
    phase: &'static str,
    step_name: &str,
    handlers: &HashMap<String, Vec<Handler<TData, Err>>>,
    ctx_data: &ContextData<TData>,
  ) -> Result<PhaseOutcome, Err> {
    let Some(handlers) = handlers.get(step_name).filter(|v| !v.is_empty()) else {
      return Ok(PhaseOutcome::Empty);
    };

    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = span!(Level::TRACE, "handler", phase, handler_index = handler_idx);
      let _handler_span_guard = handler_span.enter();
      match handler_fn(ctx_data) {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => return Ok(PhaseOutcome::Stopped),
        Err(e) => {
          event!(Level::ERROR, error = %e, "'{}' handler failed.", phase);
          return Err(e);
        }
      }
    }
    Ok(PhaseOutcome::Ran)
  }
}
