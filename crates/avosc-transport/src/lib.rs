//! avosc Transport Layer - UDP transport for OSC datagrams

pub mod udp;

pub use udp::*;
