//! Argument kind classification
//!
//! OSC carries many argument kinds; only four of them map onto a
//! [`ParameterType`]. Anything else fails the single message it arrived in.

use std::fmt;

use avosc_core::{AvoscError, AvoscResult, ParameterType, ParameterValue};

use crate::Argument;

/// Primitive kind of a decoded OSC argument
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    Int,
    Float,
    String,
    Blob,
    Time,
    Long,
    Double,
    Char,
    Color,
    Midi,
    /// OSC `T` / `F`
    Bool,
    Array,
    Nil,
    Inf,
}

impl ArgumentKind {
    pub fn of(argument: &Argument) -> Self {
        match argument {
            Argument::Int(_) => ArgumentKind::Int,
            Argument::Float(_) => ArgumentKind::Float,
            Argument::String(_) => ArgumentKind::String,
            Argument::Blob(_) => ArgumentKind::Blob,
            Argument::Time(_) => ArgumentKind::Time,
            Argument::Long(_) => ArgumentKind::Long,
            Argument::Double(_) => ArgumentKind::Double,
            Argument::Char(_) => ArgumentKind::Char,
            Argument::Color(_) => ArgumentKind::Color,
            Argument::Midi(_) => ArgumentKind::Midi,
            Argument::Bool(_) => ArgumentKind::Bool,
            Argument::Array(_) => ArgumentKind::Array,
            Argument::Nil => ArgumentKind::Nil,
            Argument::Inf => ArgumentKind::Inf,
        }
    }

    /// OSC type tag character
    pub fn type_tag(self) -> char {
        match self {
            ArgumentKind::Int => 'i',
            ArgumentKind::Float => 'f',
            ArgumentKind::String => 's',
            ArgumentKind::Blob => 'b',
            ArgumentKind::Time => 't',
            ArgumentKind::Long => 'h',
            ArgumentKind::Double => 'd',
            ArgumentKind::Char => 'c',
            ArgumentKind::Color => 'r',
            ArgumentKind::Midi => 'm',
            ArgumentKind::Bool => 'T',
            ArgumentKind::Array => '[',
            ArgumentKind::Nil => 'N',
            ArgumentKind::Inf => 'I',
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ('{}')", self, self.type_tag())
    }
}

/// Map a raw argument kind onto the parameter type it represents
pub fn classify_type(kind: ArgumentKind) -> AvoscResult<ParameterType> {
    match kind {
        ArgumentKind::Int => Ok(ParameterType::Int32),
        ArgumentKind::Float => Ok(ParameterType::Single),
        ArgumentKind::Bool => Ok(ParameterType::Boolean),
        ArgumentKind::String => Ok(ParameterType::String),
        other => Err(AvoscError::UnsupportedType(other.to_string())),
    }
}

/// Convert a raw argument into a typed parameter value
pub fn to_parameter_value(argument: &Argument) -> AvoscResult<ParameterValue> {
    match argument {
        Argument::Int(v) => Ok(ParameterValue::Int32(*v)),
        Argument::Float(v) => Ok(ParameterValue::Single(*v)),
        Argument::Bool(v) => Ok(ParameterValue::Boolean(*v)),
        Argument::String(v) => Ok(ParameterValue::String(v.clone())),
        other => Err(AvoscError::UnsupportedType(
            ArgumentKind::of(other).to_string(),
        )),
    }
}
