// strand/src/scheduler/execution.rs

//! Contains `Scheduler::next()` and the drain loop that executes queued steps.

use super::Scheduler;
use crate::core::access::Access;
use crate::core::control::DrainState;
use crate::core::step::Step;
use crate::error::StrandError;
use crate::scheduler::Resume;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{event, instrument, span, Level};

impl<T: Send + Sync + 'static> Scheduler<T> {
  /// Starts (or continues) draining the queue from the cursor.
  ///
  /// Returns once the queue is exhausted or a suspending step holds the drain.
  /// A no-op while a drain is already running (new steps are picked up by it)
  /// and while a suspending step waits for its `Resume`.
  #[instrument(
    name = "Scheduler::next",
    skip_all,
    fields(strand = %self.0.config.label)
  )]
  pub fn next(&self) {
    {
      let mut queue = self.0.queue.lock();
      match queue.state {
        DrainState::Idle => queue.state = DrainState::Draining,
        DrainState::Draining => {
          event!(Level::TRACE, "Drain already running; nothing to start.");
          return;
        }
        DrainState::Suspended { position } => {
          event!(Level::DEBUG, position, "Drain held by a suspended step; waiting for its resume.");
          return;
        }
      }
    }
    self.drain();
  }

  /// The trampoline. The caller must have moved the state to `Draining`.
  pub(crate) fn drain(&self) {
    let _unwind_guard = ResetOnUnwind(self);
    event!(Level::DEBUG, cursor = self.cursor(), "Drain starting.");

    loop {
      let (position, step) = {
        let mut queue = self.0.queue.lock();
        if queue.cursor >= queue.pending.len() {
          queue.state = DrainState::Idle;
          event!(Level::DEBUG, cursor = queue.cursor, "Queue exhausted; drain idle.");
          return;
        }
        let index = queue.cursor;
        queue.cursor += 1;
        match queue.pending[index].take() {
          Some(step) => (queue.cursor, step),
          None => {
            event!(Level::ERROR, position = queue.cursor, "Step slot already taken; skipping.");
            continue;
          }
        }
      };

      match step {
        Step::Auto { label, body } => {
          let step_span = span!(Level::TRACE, "auto_step", label = %label, position);
          let _step_span_guard = step_span.enter();
          let access = Access::new(self.0.container.clone());
          if let Err(source) = self.run_body(move || body(&access)) {
            self.report(position, &label, source);
          }
        }
        Step::Suspending { label, body } => {
          let step_span = span!(Level::TRACE, "suspending_step", label = %label, position);
          let _step_span_guard = step_span.enter();
          {
            let mut queue = self.0.queue.lock();
            queue.state = DrainState::Suspended { position };
            queue.in_body = true;
          }

          let access = Access::new(self.0.container.clone());
          let resume = Resume::new(self.clone(), position);
          let outcome = self.run_body(move || body(access, resume));

          let still_held = {
            let mut queue = self.0.queue.lock();
            queue.in_body = false;
            let held = queue.state == DrainState::Suspended { position };
            // A failed suspending step counts as resumed.
            if held && outcome.is_err() {
              queue.state = DrainState::Draining;
            }
            held
          };

          match outcome {
            Ok(()) if still_held => {
              event!(Level::DEBUG, position, "Drain suspended.");
              return;
            }
            Ok(()) => event!(Level::TRACE, position, "Resumed from inside the step body."),
            Err(source) => self.report(position, &label, source),
          }
        }
      }
    }
  }

  fn run_body(&self, body: impl FnOnce() -> anyhow::Result<()>) -> anyhow::Result<()> {
    if !self.0.config.contain_panics {
      return body();
    }
    match panic::catch_unwind(AssertUnwindSafe(body)) {
      Ok(result) => result,
      Err(payload) => Err(anyhow::anyhow!("step panicked: {}", panic_message(payload.as_ref()))),
    }
  }

  /// The logging side channel for step failures. Failures go nowhere else.
  fn report(&self, position: usize, label: &str, source: anyhow::Error) {
    let failure = StrandError::step_failed(position, label, source);
    event!(Level::ERROR, position, label, error = %failure, "Step failed; continuing with the next step.");
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    message
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.as_str()
  } else {
    "non-string panic payload"
  }
}

// Leaves the queue drainable again if an uncontained panic unwinds through the loop.
struct ResetOnUnwind<'a, T: Send + Sync + 'static>(&'a Scheduler<T>);

impl<T: Send + Sync + 'static> Drop for ResetOnUnwind<'_, T> {
  fn drop(&mut self) {
    if std::thread::panicking() {
      let mut queue = self.0 .0.queue.lock();
      queue.state = DrainState::Idle;
      queue.in_body = false;
    }
  }
}
