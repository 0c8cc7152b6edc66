//! avosc Core - Fundamental types for avatar parameter ingestion
//!
//! This crate defines the types shared by every other avosc crate:
//! - Parameter types and tagged values
//! - Events emitted for every processed message
//! - The error taxonomy

pub mod error;
pub mod event;
pub mod param;

pub use error::*;
pub use event::*;
pub use param::*;
