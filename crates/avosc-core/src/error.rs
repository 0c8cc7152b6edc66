//! Error types for avosc

use std::net::SocketAddr;

use thiserror::Error;

use crate::{DropReason, ParameterType};

/// Core avosc errors
#[derive(Error, Debug)]
pub enum AvoscError {
    // Per-message errors
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Unsupported argument type: {0}")]
    UnsupportedType(String),

    #[error("Type mismatch for {name}: expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ParameterType,
        actual: ParameterType,
    },

    // Lifecycle errors
    #[error("Listener is already running")]
    AlreadyRunning,

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    TransportError(String),

    // Setup errors
    #[error("Invalid parameter definition: {0}")]
    InvalidDefinition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Internal routing errors
    #[error("{0} is not a built-in parameter")]
    NotBuiltIn(String),
}

impl AvoscError {
    /// Reason to report when this error drops a single message.
    ///
    /// Returns `None` for errors that are not scoped to one message.
    pub fn drop_reason(&self) -> Option<DropReason> {
        match self {
            AvoscError::MalformedMessage(_) => Some(DropReason::MalformedMessage),
            AvoscError::UnsupportedType(_) => Some(DropReason::UnsupportedType),
            AvoscError::TypeMismatch { .. } => Some(DropReason::TypeMismatch),
            AvoscError::AlreadyRunning
            | AvoscError::Bind { .. }
            | AvoscError::TransportError(_)
            | AvoscError::InvalidDefinition(_)
            | AvoscError::Config(_)
            | AvoscError::NotBuiltIn(_) => None,
        }
    }
}

/// Result type for avosc operations
pub type AvoscResult<T> = Result<T, AvoscError>;
