//! Parameter type and value definitions
//!
//! Every tracked parameter has exactly one of four types, fixed when the
//! parameter is created. Values are a closed tagged union over those types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameter type - closed set of supported value kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    /// 32-bit signed integer
    Int32,
    /// 32-bit float
    Single,
    Boolean,
    String,
}

impl ParameterType {
    pub fn name(self) -> &'static str {
        match self {
            ParameterType::Int32 => "Int32",
            ParameterType::Single => "Single",
            ParameterType::Boolean => "Boolean",
            ParameterType::String => "String",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A parameter value, tagged with its type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Int32(i32),
    Single(f32),
    Boolean(bool),
    String(String),
}

impl ParameterValue {
    /// Type tag of this value
    #[inline]
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::Int32(_) => ParameterType::Int32,
            ParameterValue::Single(_) => ParameterType::Single,
            ParameterValue::Boolean(_) => ParameterType::Boolean,
            ParameterValue::String(_) => ParameterType::String,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParameterValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParameterValue::Single(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Int32(v) => write!(f, "{}", v),
            ParameterValue::Single(v) => write!(f, "{}", v),
            ParameterValue::Boolean(v) => write!(f, "{}", v),
            ParameterValue::String(v) => write!(f, "\"{}\"", v),
        }
    }
}

impl From<i32> for ParameterValue {
    fn from(v: i32) -> Self {
        ParameterValue::Int32(v)
    }
}

impl From<f32> for ParameterValue {
    fn from(v: f32) -> Self {
        ParameterValue::Single(v)
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        ParameterValue::Boolean(v)
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        ParameterValue::String(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::String(v.to_string())
    }
}
