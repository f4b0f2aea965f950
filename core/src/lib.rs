// strand/src/lib.rs

//! Strand: a deferred step-queue over an ordered collection.
//!
//! Strand lets you queue named operations against a `Vec<T>` and run them
//! strictly one at a time, in the order they were queued, whether a step
//! finishes on the spot or has to wait for an external event:
//!  - Built-in transforms (`map`, `filter`, `slice`, `splice`, `sort`, ...).
//!  - In-place `append` / `prepend`.
//!  - `wait` steps that pause the drain until their `Resume` handle is used.
//!  - `tap` steps for inspecting the sequence and the queue.
//!  - Session-scoped mixins: new verbs registered by name and invoked with `call`.
//!  - Failure containment: a failing step is logged and the drain moves on.

pub mod chain;
pub mod config;
pub mod core;
pub mod error;
pub mod registry;
pub mod scheduler;

// --- Re-exports for the Public API ---

pub use crate::chain::{Strand, StrandBuilder};
pub use crate::config::StrandConfig;
pub use crate::core::access::{Access, ReadAccess};
pub use crate::core::container::Container;
pub use crate::core::control::{DrainState, QueueSnapshot, StepKind};
pub use crate::core::step::Step;
pub use crate::error::{StrandError, StrandResult};
pub use crate::registry::{MixinRegistry, MixinTable};
pub use crate::scheduler::{Resume, Scheduler};

/*
    Typical use:
    1. Wrap a sequence: `let strand = Strand::new(vec![1, 2, 3]);`
    2. Queue work: `strand.map(|x| x * 2).filter(|x| *x > 2);`
    3. Start the drain: `let out = strand.value();` -> `[4, 6]`
    4. To pause on external work, queue `wait(|access, resume| { ...; resume.resume(); Ok(()) })`
       and move `resume` into whatever completes the work. `value()` returns what is
       there when the drain pauses; read `get()` again once it has resumed.
*/
