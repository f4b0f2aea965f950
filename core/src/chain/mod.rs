// strand/src/chain/mod.rs

//! Defines `Strand<T>`, the chainable front end over a container and its scheduler.

pub mod adapters;
pub mod definition;
pub mod flow;

pub use definition::{Strand, StrandBuilder};
