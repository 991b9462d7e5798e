//! Treereap core - platform-independent process-tree termination
//!
//! This crate provides the process-reference model, the two descendant
//! sweep strategies, and the best-effort error policy that are shared
//! across platform-specific implementations.

mod error;
mod refs;
mod signal;
mod sweep;

pub use error::*;
pub use refs::*;
pub use signal::*;
pub use sweep::*;
