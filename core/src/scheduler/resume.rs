// strand/src/scheduler/resume.rs

//! The continuation handed to a suspending step.

use super::Scheduler;
use crate::core::control::DrainState;
use tracing::{event, Level};

/// Single-use handle that releases the drain held by one suspending step.
///
/// Calling `resume` inside the step body lets the current drain carry on once
/// the body returns. Calling it later (from a timer, another task or thread)
/// restarts the drain on the caller's stack. Dropping it without calling
/// `resume` stalls the strand for good.
pub struct Resume<T: Send + Sync + 'static> {
  scheduler: Scheduler<T>,
  position: usize,
}

impl<T: Send + Sync + 'static> Resume<T> {
  pub(crate) fn new(scheduler: Scheduler<T>, position: usize) -> Self {
    Self { scheduler, position }
  }

  /// Position (1-based) of the suspending step this handle belongs to.
  pub fn position(&self) -> usize {
    self.position
  }

  pub fn resume(self) {
    let restart = {
      let mut queue = self.scheduler.0.queue.lock();
      match queue.state {
        DrainState::Suspended { position } if position == self.position => {
          queue.state = DrainState::Draining;
          !queue.in_body
        }
        state => {
          event!(
            Level::WARN,
            strand = %self.scheduler.0.config.label,
            position = self.position,
            ?state,
            "Stale resume ignored; its step no longer holds the drain."
          );
          return;
        }
      }
    };

    if restart {
      event!(Level::DEBUG, strand = %self.scheduler.0.config.label, position = self.position, "Resuming drain.");
      self.scheduler.drain();
    }
  }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for Resume<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Resume").field("position", &self.position).finish()
  }
}
