//! avosc Wire - OSC datagram format
//!
//! This crate implements the subset of Open Sound Control used by avatar
//! clients:
//! - Datagram decoding into messages (address + typed arguments)
//! - Bundle decoding (carried through, not interpreted)
//! - Mapping of raw argument kinds onto parameter types

pub mod kind;
pub mod message;

pub use kind::*;
pub use message::*;
