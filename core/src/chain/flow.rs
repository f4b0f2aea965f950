// strand/src/chain/flow.rs

//! Flow-control verbs: `mixins`/`call` for user-defined steps, `wait` for
//! suspension, `tap` for inspection, and `value` to start the drain.

use crate::chain::definition::Strand;
use crate::core::access::{Access, ReadAccess};
use crate::core::control::QueueSnapshot;
use crate::core::step::Step;
use crate::error::StrandError;
use crate::registry::MixinTable;
use crate::scheduler::{Resume, Scheduler};
use tracing::{event, Level};

impl<T: Clone + Send + Sync + 'static> Strand<T> {
  /// Installs `table` into this strand's registry right away (not queued).
  /// Every strand sharing the registry can `call` the new verbs.
  pub fn mixins(&self, table: MixinTable<T>) -> &Self {
    event!(Level::DEBUG, strand = %self.config().label, count = table.len(), "Installing mixins.");
    self.registry.install(table);
    self
  }

  /// Queues a call to the mixin `name` with `args`.
  ///
  /// The name is resolved when the step runs, against this strand's registry,
  /// and the mixin operates on this strand's sequence. An unknown name or a
  /// wrong argument type is reported as a step failure.
  pub fn call<A: Send + 'static>(&self, name: impl Into<String>, args: A) -> &Self {
    let name = name.into();
    let registry = self.registry.clone();
    self.push(Step::auto(name.clone(), move |access| {
      registry.dispatch(&name, access, Box::new(args))
    }))
  }

  /// Queues a suspending step. The drain stops after `callback` returns and
  /// only continues once the `Resume` handle is used, from inside the callback
  /// or at any later point.
  pub fn wait(
    &self,
    callback: impl FnOnce(Access<T>, Resume<T>) -> anyhow::Result<()> + Send + 'static,
  ) -> &Self {
    self.push(Step::suspending("wait", callback))
  }

  /// Queues a read-only inspection of the sequence and the queue.
  pub fn tap(&self, callback: impl FnOnce(&ReadAccess<T>, &QueueSnapshot) + Send + 'static) -> &Self {
    let scheduler = self.scheduler.downgrade();
    self.push(Step::auto("tap", move |access| {
      let snapshot = Scheduler::upgrade(&scheduler)
        .map(|scheduler| scheduler.snapshot())
        .ok_or_else(|| StrandError::Internal("scheduler dropped during tap".to_string()))?;
      callback(&access.reader(), &snapshot);
      Ok(())
    }))
  }

  /// Runs one `next()` and returns the sequence as it stands when that call
  /// returns.
  ///
  /// If a suspending step is reached (or is still waiting from earlier), the
  /// returned copy reflects a drain that has not finished yet; read `get()`
  /// again after resuming.
  pub fn value(&self) -> Vec<T> {
    self.scheduler.next();
    self.get()
  }

  /// Queues `callback` as a final step, then behaves like `value()`.
  pub fn value_with(&self, callback: impl FnOnce(&ReadAccess<T>) + Send + 'static) -> Vec<T> {
    self.push(Step::auto("value", move |access| {
      callback(&access.reader());
      Ok(())
    }));
    self.value()
  }
}
