//! Type table and dependency-ordered classifier for cshim.
//!
//! This crate owns the first generation pass: walking a
//! [`cshim_core::BindingUnit`]'s field containment DAG in topological order
//! and assigning every aggregate its representation [`cshim_core::Kind`].
//! The resulting [`TypeTable`] is populated single-threaded and read-only
//! afterwards; the synthesizer consumes it in dependency order.

mod classify;
mod table;

pub use classify::{Classification, classify_unit};
pub use table::{TypeRecord, TypeTable};
