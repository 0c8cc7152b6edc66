//! Event definitions
//!
//! One or more events are emitted for every message the dispatcher processes.
//! Consumers (overlay UI, logging) read these instead of reaching into the
//! listener.

use std::fmt;

use crate::{ParameterType, ParameterValue};

/// Why a message was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    MalformedMessage,
    UnsupportedType,
    TypeMismatch,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MalformedMessage => write!(f, "MalformedMessage"),
            DropReason::UnsupportedType => write!(f, "UnsupportedType"),
            DropReason::TypeMismatch => write!(f, "TypeMismatch"),
        }
    }
}

/// Parameter update event
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterEvent {
    /// A registered built-in parameter received a value
    BuiltInParameterUpdated { name: String, value: ParameterValue },

    /// A parameter was seen for the first time and added to the dynamic set
    DynamicParameterCreated {
        name: String,
        parameter_type: ParameterType,
        max_history: usize,
    },

    /// A dynamic parameter received a value
    DynamicParameterUpdated { name: String, value: ParameterValue },

    /// A message was discarded without touching the store
    MessageDropped { reason: DropReason, detail: String },
}

impl ParameterEvent {
    /// Parameter name this event refers to (if any)
    pub fn name(&self) -> Option<&str> {
        match self {
            ParameterEvent::BuiltInParameterUpdated { name, .. } => Some(name),
            ParameterEvent::DynamicParameterCreated { name, .. } => Some(name),
            ParameterEvent::DynamicParameterUpdated { name, .. } => Some(name),
            ParameterEvent::MessageDropped { .. } => None,
        }
    }

    /// Value carried by an update event
    pub fn value(&self) -> Option<&ParameterValue> {
        match self {
            ParameterEvent::BuiltInParameterUpdated { value, .. }
            | ParameterEvent::DynamicParameterUpdated { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_dropped(&self) -> bool {
        matches!(self, ParameterEvent::MessageDropped { .. })
    }
}

impl fmt::Display for ParameterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterEvent::BuiltInParameterUpdated { name, value } => {
                write!(f, "Built-in [{}] = {}", name, value)
            }
            ParameterEvent::DynamicParameterCreated {
                name,
                parameter_type,
                max_history,
            } => write!(
                f,
                "Dynamic ++ [{}] type {} | history allowed: {}",
                name, parameter_type, max_history
            ),
            ParameterEvent::DynamicParameterUpdated { name, value } => {
                write!(f, "Dynamic [{}] = {}", name, value)
            }
            ParameterEvent::MessageDropped { reason, detail } => {
                write!(f, "Dropped ({}): {}", reason, detail)
            }
        }
    }
}
