// storefront/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct and methods for its construction
//! and structural modification.

use crate::core::context::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::StorefrontError;
use std::collections::HashMap;

/// An ordered list of named steps with `before`/`on`/`after` handlers per step.
///
/// `Err` is the error type handlers return. It must be constructible from
/// `StorefrontError` so the engine can report its own failures (e.g. a
/// non-optional step with no handler) through the same channel.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<StorefrontError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<StorefrontError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(step name, optional, skip condition)` tuples.
  pub fn new(name: impl Into<String>, step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      name: name.into(),
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn step_index(&self, step_name: &str) -> Option<usize> {
    self.steps.iter().position(|s| s.name == step_name)
  }

  /// Panics if the step is not defined. A typo in a step name is a setup bug.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> usize {
    match self.step_index(step_name) {
      Some(idx) => idx,
      None => panic!(
        "Storefront setup error: step '{}' not found in pipeline '{}'.",
        step_name, self.name
      ),
    }
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.step_index(step_name).is_some() {
      panic!(
        "Storefront setup error: step '{}' already exists in pipeline '{}'.",
        step_name, self.name
      );
    }
  }

  pub fn insert_before_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    let idx = self.ensure_step_exists(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(
      idx,
      StepDef {
        name,
        optional,
        skip_if,
      },
    );
  }

  pub fn insert_after_step<S: Into<String>>(
    &mut self,
    existing_step_name: &str,
    new_step_name: S,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) {
    let idx = self.ensure_step_exists(existing_step_name);
    let name: String = new_step_name.into();
    self.ensure_step_not_exists(&name);
    self.steps.insert(
      idx + 1,
      StepDef {
        name,
        optional,
        skip_if,
      },
    );
  }

  /// Removes a step and all handlers registered for it. Unknown names are ignored.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.step_index(step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    let idx = self.ensure_step_exists(step_name);
    self.steps[idx].optional = optional;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    let idx = self.ensure_step_exists(step_name);
    self.steps[idx].skip_if = skip_if;
  }
}
