//! Tracked parameter entries

use avosc_core::{AvoscError, AvoscResult, ParameterType, ParameterValue};

use crate::History;

/// History depth given to parameters discovered at runtime
pub const DEFAULT_DYNAMIC_HISTORY: usize = 5;

/// One tracked parameter
///
/// The type and history bound are fixed at creation; every value in the
/// history has the parameter's type.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    name: String,
    /// Address the parameter was last observed on
    address: String,
    parameter_type: ParameterType,
    is_built_in: bool,
    history: History<ParameterValue>,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        parameter_type: ParameterType,
        max_history: usize,
        is_built_in: bool,
    ) -> Self {
        Parameter {
            name: name.into(),
            address: address.into(),
            parameter_type,
            is_built_in,
            history: History::new(max_history),
        }
    }

    /// Append a value observed on `address`.
    ///
    /// Fails with `TypeMismatch` and leaves the parameter untouched if the
    /// value's type differs from the parameter's.
    pub fn set_value(&mut self, address: &str, value: ParameterValue) -> AvoscResult<()> {
        let actual = value.parameter_type();
        if actual != self.parameter_type {
            return Err(AvoscError::TypeMismatch {
                name: self.name.clone(),
                expected: self.parameter_type,
                actual,
            });
        }

        self.history.push(value);
        if self.address != address {
            self.address = address.to_string();
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    pub fn max_history(&self) -> usize {
        self.history.max_len()
    }

    pub fn is_built_in(&self) -> bool {
        self.is_built_in
    }

    /// Most recent value, `None` until the first update
    pub fn latest_value(&self) -> Option<&ParameterValue> {
        self.history.latest()
    }

    /// History values, oldest first
    pub fn values(&self) -> Vec<ParameterValue> {
        self.history.to_vec()
    }

    pub fn history(&self) -> &History<ParameterValue> {
        &self.history
    }
}
