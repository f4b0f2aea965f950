// strand/src/registry.rs

//! Defines `MixinRegistry<T>`, a name-keyed table of user-defined chain verbs,
//! and `MixinTable<T>`, the batch of entries handed to `Strand::mixins`.
//!
//! A registry belongs to a session, not to the process: every strand built with
//! the same registry sees the same verbs (including strands created before a
//! verb was installed), and strands with different registries never see each
//! other's verbs.

use crate::core::access::Access;
use crate::error::StrandError;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// Type-erased mixin, so verbs with different argument types share one table.
pub trait AnyMixin<T: Send + Sync + 'static>: Send + Sync {
  /// Runs the mixin. `args` must hold the argument type the mixin was registered with.
  fn invoke_erased(&self, name: &str, access: &Access<T>, args: Box<dyn Any + Send>) -> anyhow::Result<()>;

  fn args_type_name(&self) -> &'static str;
}

/// Concrete mixin over argument type `A`.
pub struct MixinImpl<T: Send + Sync + 'static, A: Send + 'static> {
  mixin_fn: Arc<dyn Fn(&Access<T>, A) -> anyhow::Result<()> + Send + Sync + 'static>,
}

impl<T: Send + Sync + 'static, A: Send + 'static> MixinImpl<T, A> {
  pub fn new(f: impl Fn(&Access<T>, A) -> anyhow::Result<()> + Send + Sync + 'static) -> Self {
    Self { mixin_fn: Arc::new(f) }
  }
}

impl<T: Send + Sync + 'static, A: Send + 'static> AnyMixin<T> for MixinImpl<T, A> {
  fn invoke_erased(&self, name: &str, access: &Access<T>, args: Box<dyn Any + Send>) -> anyhow::Result<()> {
    let args = args.downcast::<A>().map_err(|_| StrandError::TypeMismatch {
      name: name.to_string(),
      expected_type: std::any::type_name::<A>().to_string(),
    })?;
    (self.mixin_fn)(access, *args)
  }

  fn args_type_name(&self) -> &'static str {
    std::any::type_name::<A>()
  }
}

/// An ordered batch of named mixins waiting to be installed.
pub struct MixinTable<T: Send + Sync + 'static> {
  entries: Vec<(String, Arc<dyn AnyMixin<T>>)>,
}

impl<T: Send + Sync + 'static> MixinTable<T> {
  pub fn new() -> Self {
    Self { entries: Vec::new() }
  }

  /// Adds a verb taking arguments of type `A`. Call it with a value of exactly that type.
  pub fn with<A: Send + 'static>(
    mut self,
    name: impl Into<String>,
    f: impl Fn(&Access<T>, A) -> anyhow::Result<()> + Send + Sync + 'static,
  ) -> Self {
    self.insert(name, f);
    self
  }

  pub fn insert<A: Send + 'static>(
    &mut self,
    name: impl Into<String>,
    f: impl Fn(&Access<T>, A) -> anyhow::Result<()> + Send + Sync + 'static,
  ) {
    self.entries.push((name.into(), Arc::new(MixinImpl::<T, A>::new(f))));
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<T: Send + Sync + 'static> Default for MixinTable<T> {
  fn default() -> Self {
    Self::new()
  }
}

/// Shared, grow-only map from verb name to mixin. Cloning shares the table.
pub struct MixinRegistry<T: Send + Sync + 'static> {
  table: Arc<RwLock<HashMap<String, Arc<dyn AnyMixin<T>>>>>,
}

impl<T: Send + Sync + 'static> MixinRegistry<T> {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self {
      table: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  /// Installs every entry of `table`. A name that is already present is replaced.
  pub fn install(&self, table: MixinTable<T>) {
    let mut registry = self.table.write();
    for (name, mixin) in table.entries {
      event!(Level::DEBUG, mixin = %name, args_type = mixin.args_type_name(), "Registering mixin.");
      if registry.insert(name.clone(), mixin).is_some() {
        event!(Level::WARN, mixin = %name, "Mixin name was already registered; replaced.");
      }
    }
  }

  pub fn get(&self, name: &str) -> Option<Arc<dyn AnyMixin<T>>> {
    self.table.read().get(name).cloned()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.table.read().contains_key(name)
  }

  /// Registered names, sorted.
  pub fn names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.table.read().keys().cloned().collect();
    names.sort();
    names
  }

  pub fn len(&self) -> usize {
    self.table.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.read().is_empty()
  }

  /// Resolves `name` and runs it against `access`.
  ///
  /// The table lock is released before the mixin runs, so a mixin may itself
  /// install further mixins.
  pub fn dispatch(&self, name: &str, access: &Access<T>, args: Box<dyn Any + Send>) -> anyhow::Result<()> {
    let mixin = self.get(name).ok_or_else(|| {
      event!(Level::ERROR, mixin = %name, "No mixin registered under this name.");
      StrandError::MixinNotFound { name: name.to_string() }
    })?;
    mixin.invoke_erased(name, access, args)
  }

  /// True if both handles share one table.
  pub fn same_as(&self, other: &MixinRegistry<T>) -> bool {
    Arc::ptr_eq(&self.table, &other.table)
  }
}

impl<T: Send + Sync + 'static> Clone for MixinRegistry<T> {
  fn clone(&self) -> Self {
    Self {
      table: Arc::clone(&self.table),
    }
  }
}

impl<T: Send + Sync + 'static> Default for MixinRegistry<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for MixinRegistry<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MixinRegistry").field("names", &self.names()).finish()
  }
}
