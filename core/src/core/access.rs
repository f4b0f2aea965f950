// strand/src/core/access.rs

//! Capability views handed to step bodies instead of the whole strand.
//!
//! - `ReadAccess<T>` is given to inspection steps (`tap`, `value_with`).
//! - `Access<T>` is given to mutating steps (mixins, `wait`, raw `Step::auto`).
//!
//! The continuation of a suspending step is a separate `Resume<T>` handle so a
//! body's permission to restart the drain is visible in its signature.

use crate::core::container::Container;
use parking_lot::{RwLockReadGuard, RwLockWriteGuard};

/// Read-only view of a strand's sequence.
pub struct ReadAccess<T: Send + Sync + 'static> {
  container: Container<T>,
}

impl<T: Send + Sync + 'static> ReadAccess<T> {
  pub(crate) fn new(container: Container<T>) -> Self {
    Self { container }
  }

  /// The returned guard MUST be dropped before the body returns.
  pub fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
    self.container.read()
  }

  pub fn len(&self) -> usize {
    self.container.len()
  }

  pub fn is_empty(&self) -> bool {
    self.container.is_empty()
  }
}

impl<T: Clone + Send + Sync + 'static> ReadAccess<T> {
  pub fn get(&self) -> Vec<T> {
    self.container.get()
  }
}

impl<T: Send + Sync + 'static> Clone for ReadAccess<T> {
  fn clone(&self) -> Self {
    Self::new(self.container.clone())
  }
}

/// Read/write view of a strand's sequence.
pub struct Access<T: Send + Sync + 'static> {
  container: Container<T>,
}

impl<T: Send + Sync + 'static> Access<T> {
  pub(crate) fn new(container: Container<T>) -> Self {
    Self { container }
  }

  pub fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
    self.container.read()
  }

  /// Live, in-place mutation of the sequence.
  pub fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
    self.container.write()
  }

  /// Replaces the sequence; `None` is ignored.
  pub fn set(&self, candidate: impl Into<Option<Vec<T>>>) {
    self.container.set(candidate)
  }

  pub fn len(&self) -> usize {
    self.container.len()
  }

  pub fn is_empty(&self) -> bool {
    self.container.is_empty()
  }

  /// Narrows this view to read-only.
  pub fn reader(&self) -> ReadAccess<T> {
    ReadAccess::new(self.container.clone())
  }
}

impl<T: Clone + Send + Sync + 'static> Access<T> {
  pub fn get(&self) -> Vec<T> {
    self.container.get()
  }
}

impl<T: Send + Sync + 'static> Clone for Access<T> {
  fn clone(&self) -> Self {
    Self::new(self.container.clone())
  }
}
