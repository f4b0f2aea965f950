// strand/src/core/control.rs

//! Step kinds, drain states, and the queue snapshot exposed to `tap`.

/// Whether a step lets the scheduler move on by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
  /// The scheduler proceeds to the next step as soon as the body returns.
  Auto,
  /// The drain pauses until the step's `Resume` handle is used.
  Suspending,
}

/// Where the scheduler currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainState {
  /// No drain is running. Either nothing was started yet or the queue was exhausted.
  Idle,
  /// A drain loop is executing steps.
  Draining,
  /// The suspending step at `position` (1-based) holds the drain.
  Suspended { position: usize },
}

/// Point-in-time view of the step queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
  /// Number of steps taken so far.
  pub cursor: usize,
  /// Labels of every step ever enqueued, in order.
  pub labels: Vec<String>,
  pub state: DrainState,
}

impl QueueSnapshot {
  pub fn len(&self) -> usize {
    self.labels.len()
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }

  /// Labels of steps not yet taken.
  pub fn pending(&self) -> &[String] {
    &self.labels[self.cursor.min(self.labels.len())..]
  }
}
