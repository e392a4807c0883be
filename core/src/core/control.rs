// storefront/src/core/control.rs

//! Signals for controlling action flow and the outcome of a pipeline run.

/// Signal from a handler indicating whether the action should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Continue with the remaining handlers and steps.
  Continue,
  /// Halt the action here. Nothing after this handler runs, including rendering.
  /// Used for no-op actions such as updating a line that is not in the cart.
  Stop,
}

/// Outcome of a full pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every non-skipped step ran to completion.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}

impl PipelineResult {
  pub fn is_completed(self) -> bool {
    matches!(self, PipelineResult::Completed)
  }
}
