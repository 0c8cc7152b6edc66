//! avosc Runtime - Listener orchestration and dispatch
//!
//! Per datagram, in arrival order:
//! 1. Receive from the UDP socket
//! 2. Decode the OSC packet
//! 3. Resolve the address to a parameter name
//! 4. Look the name up in the built-in registry
//! 5. Apply the first argument to the built-in or dynamic partition
//! 6. Emit events to the consumer callback and the log

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod listener;
pub mod logging;
pub mod stats;

pub use config::*;
pub use context::*;
pub use dispatcher::*;
pub use listener::*;
pub use logging::*;
pub use stats::*;
