pub mod access;
pub mod container;
pub mod control;
pub mod step;

// Re-export key types for easier access from other strand modules (and lib.rs)
pub use access::{Access, ReadAccess};
pub use container::Container;
pub use control::{DrainState, QueueSnapshot, StepKind};
pub use step::Step;
