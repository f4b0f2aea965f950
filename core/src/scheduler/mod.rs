// strand/src/scheduler/mod.rs

//! The step queue and the scheduler that drains it.

pub mod execution;
pub mod resume;

pub use resume::Resume;

use crate::config::StrandConfig;
use crate::core::container::Container;
use crate::core::control::{DrainState, QueueSnapshot};
use crate::core::step::Step;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{event, Level};

/// Append-only list of steps plus the cursor of the next step to take.
pub(crate) struct StepQueue<T: Send + Sync + 'static> {
  // A slot becomes `None` once its step has been taken; it is never refilled.
  pub(crate) pending: Vec<Option<Step<T>>>,
  pub(crate) labels: Vec<String>,
  pub(crate) cursor: usize,
  pub(crate) state: DrainState,
  // True while a suspending body is on the drain loop's stack.
  pub(crate) in_body: bool,
}

impl<T: Send + Sync + 'static> StepQueue<T> {
  fn new() -> Self {
    Self {
      pending: Vec::new(),
      labels: Vec::new(),
      cursor: 0,
      state: DrainState::Idle,
      in_body: false,
    }
  }
}

pub(crate) struct SchedulerShared<T: Send + Sync + 'static> {
  pub(crate) queue: Mutex<StepQueue<T>>,
  pub(crate) container: Container<T>,
  pub(crate) config: StrandConfig,
}

/// Runs queued steps one at a time, in the order they were enqueued.
///
/// Cloning yields another handle to the same queue.
pub struct Scheduler<T: Send + Sync + 'static>(pub(crate) Arc<SchedulerShared<T>>);

impl<T: Send + Sync + 'static> Scheduler<T> {
  pub fn new(container: Container<T>, config: StrandConfig) -> Self {
    Scheduler(Arc::new(SchedulerShared {
      queue: Mutex::new(StepQueue::new()),
      container,
      config,
    }))
  }

  /// Appends `step` and returns the new queue length. Safe to call from inside
  /// a running step; the step is picked up by the current drain if one is active.
  pub fn enqueue(&self, step: Step<T>) -> usize {
    let mut queue = self.0.queue.lock();
    event!(Level::TRACE, strand = %self.0.config.label, label = step.label(), kind = ?step.kind(), "Step enqueued.");
    queue.labels.push(step.label().to_string());
    queue.pending.push(Some(step));
    queue.pending.len()
  }

  pub fn len(&self) -> usize {
    self.0.queue.lock().pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn cursor(&self) -> usize {
    self.0.queue.lock().cursor
  }

  pub fn state(&self) -> DrainState {
    self.0.queue.lock().state
  }

  pub fn snapshot(&self) -> QueueSnapshot {
    let queue = self.0.queue.lock();
    QueueSnapshot {
      cursor: queue.cursor,
      labels: queue.labels.clone(),
      state: queue.state,
    }
  }

  pub fn container(&self) -> &Container<T> {
    &self.0.container
  }

  pub fn config(&self) -> &StrandConfig {
    &self.0.config
  }

  // Steps that need the scheduler hold it weakly, so a never-drained step does
  // not keep its own queue alive.
  pub(crate) fn downgrade(&self) -> Weak<SchedulerShared<T>> {
    Arc::downgrade(&self.0)
  }

  pub(crate) fn upgrade(weak: &Weak<SchedulerShared<T>>) -> Option<Self> {
    weak.upgrade().map(Scheduler)
  }
}

impl<T: Send + Sync + 'static> Clone for Scheduler<T> {
  fn clone(&self) -> Self {
    Scheduler(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for Scheduler<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let queue = self.0.queue.lock();
    f.debug_struct("Scheduler")
      .field("label", &self.0.config.label)
      .field("len", &queue.pending.len())
      .field("cursor", &queue.cursor)
      .field("state", &queue.state)
      .finish()
  }
}
