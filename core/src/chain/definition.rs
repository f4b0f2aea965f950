// strand/src/chain/definition.rs

//! Contains the `Strand<T>` struct, its construction, and the direct (unqueued)
//! accessors.

use crate::config::StrandConfig;
use crate::core::container::Container;
use crate::core::control::QueueSnapshot;
use crate::core::step::Step;
use crate::registry::MixinRegistry;
use crate::scheduler::Scheduler;
use tracing::{event, Level};

/// A sequencing session over a `Vec<T>`.
///
/// Chain methods queue steps and return `&Self`; nothing runs until `value()`
/// (or `next()`) starts the drain. Cloning a strand yields another handle to the
/// same session: same sequence, same queue, same mixins.
pub struct Strand<T: Send + Sync + 'static> {
  pub(crate) scheduler: Scheduler<T>,
  pub(crate) registry: MixinRegistry<T>,
}

impl<T: Clone + Send + Sync + 'static> Strand<T> {
  /// Starts a session over `initial` with default settings and its own mixin registry.
  pub fn new(initial: Vec<T>) -> Self {
    Self::builder().build(initial)
  }

  pub fn builder() -> StrandBuilder<T> {
    StrandBuilder::new()
  }

  /// Wraps a sequence, or returns an existing strand unchanged.
  pub fn wrap(source: impl Into<Strand<T>>) -> Self {
    source.into()
  }

  /// Appends a raw step. Returns the new queue length.
  pub fn enqueue(&self, step: Step<T>) -> usize {
    self.scheduler.enqueue(step)
  }

  /// Starts or continues the drain without queueing anything.
  pub fn next(&self) {
    self.scheduler.next()
  }

  /// Current sequence, read outside the queue.
  pub fn get(&self) -> Vec<T> {
    self.scheduler.container().get()
  }

  /// Replaces the sequence immediately, outside the queue. `None` is ignored.
  pub fn set(&self, candidate: impl Into<Option<Vec<T>>>) {
    self.scheduler.container().set(candidate)
  }

  /// The live container. Its guards mutate the sequence behind the queue's back.
  pub fn container(&self) -> &Container<T> {
    self.scheduler.container()
  }

  pub fn snapshot(&self) -> QueueSnapshot {
    self.scheduler.snapshot()
  }

  /// The mixin registry this strand dispatches `call` through.
  pub fn registry(&self) -> &MixinRegistry<T> {
    &self.registry
  }

  pub fn config(&self) -> &StrandConfig {
    self.scheduler.config()
  }

  pub(crate) fn push(&self, step: Step<T>) -> &Self {
    self.scheduler.enqueue(step);
    self
  }
}

impl<T: Send + Sync + 'static> Clone for Strand<T> {
  fn clone(&self) -> Self {
    Self {
      scheduler: self.scheduler.clone(),
      registry: self.registry.clone(),
    }
  }
}

impl<T: Clone + Send + Sync + 'static> From<Vec<T>> for Strand<T> {
  fn from(initial: Vec<T>) -> Self {
    Strand::new(initial)
  }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for Strand<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Strand")
      .field("scheduler", &self.scheduler)
      .field("registry", &self.registry)
      .finish()
  }
}

/// Construction-time configuration for a `Strand`.
pub struct StrandBuilder<T: Send + Sync + 'static> {
  config: StrandConfig,
  registry: Option<MixinRegistry<T>>,
}

impl<T: Clone + Send + Sync + 'static> StrandBuilder<T> {
  pub fn new() -> Self {
    Self {
      config: StrandConfig::default(),
      registry: None,
    }
  }

  pub fn label(mut self, label: impl Into<String>) -> Self {
    self.config.label = label.into();
    self
  }

  /// Shares `registry` with this strand instead of creating a fresh one.
  pub fn registry(mut self, registry: MixinRegistry<T>) -> Self {
    self.registry = Some(registry);
    self
  }

  pub fn contain_panics(mut self, contain: bool) -> Self {
    self.config.contain_panics = contain;
    self
  }

  pub fn config(mut self, config: StrandConfig) -> Self {
    self.config = config;
    self
  }

  pub fn build(self, initial: Vec<T>) -> Strand<T> {
    event!(
      Level::DEBUG,
      strand = %self.config.label,
      len = initial.len(),
      shared_registry = self.registry.is_some(),
      "Creating strand."
    );
    Strand {
      scheduler: Scheduler::new(Container::new(initial), self.config),
      registry: self.registry.unwrap_or_default(),
    }
  }
}

impl<T: Clone + Send + Sync + 'static> Default for StrandBuilder<T> {
  fn default() -> Self {
    Self::new()
  }
}
