// strand/src/core/container.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use tracing::{event, Level};

/// Owns the wrapped sequence with shared ownership and interior mutability
/// using parking_lot::RwLock.
///
/// IMPORTANT: guards obtained from this struct are blocking. Drop them before
/// calling anything that locks the container again (`get`, `set`, another guard).
#[derive(Debug)]
pub struct Container<T: Send + Sync + 'static>(Arc<RwLock<Vec<T>>>);

impl<T: Send + Sync + 'static> Container<T> {
  pub fn new(sequence: Vec<T>) -> Self {
    Container(Arc::new(RwLock::new(sequence)))
  }

  /// Live read access to the sequence.
  pub fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
    self.0.read()
  }

  /// Live write access to the sequence. Mutations through this guard bypass the
  /// step queue entirely.
  pub fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
    self.0.write()
  }

  /// Replaces the sequence if `candidate` holds one. `None` stands for a
  /// non-sequence value and is ignored, keeping the previous sequence.
  pub fn set(&self, candidate: impl Into<Option<Vec<T>>>) {
    match candidate.into() {
      Some(sequence) => *self.0.write() = sequence,
      None => event!(Level::TRACE, "Rejected non-sequence replacement; keeping previous sequence."),
    }
  }

  pub fn len(&self) -> usize {
    self.0.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.read().is_empty()
  }
}

impl<T: Clone + Send + Sync + 'static> Container<T> {
  /// Returns a copy of the current sequence.
  pub fn get(&self) -> Vec<T> {
    self.0.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for Container<T> {
  fn clone(&self) -> Self {
    Container(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static> Default for Container<T> {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_none_keeps_previous_sequence() {
    let container = Container::new(vec![1, 2, 3]);
    container.set(None);
    assert_eq!(container.get(), vec![1, 2, 3]);
    container.set(vec![7]);
    assert_eq!(container.get(), vec![7]);
  }

  #[test]
  fn clones_share_the_live_sequence() {
    let container = Container::new(vec!["a"]);
    let alias = container.clone();
    alias.write().push("b");
    assert_eq!(container.get(), vec!["a", "b"]);
    assert_eq!(container.len(), 2);
  }
}
