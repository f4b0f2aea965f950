// strand/src/core/step.rs

//! Defines a single queued unit of work.

use super::access::Access;
use super::control::StepKind;
use crate::scheduler::Resume;

/// Body of an auto-advancing step.
pub type AutoBody<T> = Box<dyn FnOnce(&Access<T>) -> anyhow::Result<()> + Send + 'static>;

/// Body of a suspending step. It owns its `Access` and `Resume` so both can be
/// moved into whatever later event finishes the work.
pub type SuspendingBody<T> = Box<dyn FnOnce(Access<T>, Resume<T>) -> anyhow::Result<()> + Send + 'static>;

/// A step, tagged with how the scheduler proceeds after running it.
pub enum Step<T: Send + Sync + 'static> {
  Auto { label: String, body: AutoBody<T> },
  Suspending { label: String, body: SuspendingBody<T> },
}

impl<T: Send + Sync + 'static> Step<T> {
  pub fn auto(
    label: impl Into<String>,
    body: impl FnOnce(&Access<T>) -> anyhow::Result<()> + Send + 'static,
  ) -> Self {
    Step::Auto {
      label: label.into(),
      body: Box::new(body),
    }
  }

  pub fn suspending(
    label: impl Into<String>,
    body: impl FnOnce(Access<T>, Resume<T>) -> anyhow::Result<()> + Send + 'static,
  ) -> Self {
    Step::Suspending {
      label: label.into(),
      body: Box::new(body),
    }
  }

  pub fn label(&self) -> &str {
    match self {
      Step::Auto { label, .. } | Step::Suspending { label, .. } => label,
    }
  }

  pub fn kind(&self) -> StepKind {
    match self {
      Step::Auto { .. } => StepKind::Auto,
      Step::Suspending { .. } => StepKind::Suspending,
    }
  }
}

// Bodies are closures, so only the tag and label are printed.
impl<T: Send + Sync + 'static> std::fmt::Debug for Step<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Step")
      .field("label", &self.label())
      .field("kind", &self.kind())
      .finish()
  }
}
