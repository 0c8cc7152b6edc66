//! avosc State - Parameter registry and store
//!
//! This crate holds everything the listener mutates and consumers read:
//! - Bounded value history
//! - Parameter entries (built-in and dynamic)
//! - The immutable built-in registry
//! - The shared, lock-protected parameter store

pub mod history;
pub mod parameter;
pub mod registry;
pub mod store;

pub use history::*;
pub use parameter::*;
pub use registry::*;
pub use store::*;
