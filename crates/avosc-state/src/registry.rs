//! Built-in parameter registry
//!
//! Populated once before the listener starts and never mutated afterwards.
//! Lookups report "not found" as an ordinary `None`; that outcome is what
//! routes a message to the dynamic partition.

use std::collections::HashMap;

use avosc_core::{AvoscError, AvoscResult, ParameterType};
use serde::{Deserialize, Serialize};

/// Address prefix for avatar parameters
pub const AVATAR_PARAMETER_PREFIX: &str = "/avatar/parameters/";

/// Address signalling an avatar change
pub const AVATAR_CHANGE_ADDRESS: &str = "/avatar/change";

/// Parameter name the avatar change address resolves to
pub const AVATAR_CHANGE_NAME: &str = "AvatarChange";

fn default_max_history() -> usize {
    5
}

/// Definition of one built-in parameter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltInDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl BuiltInDefinition {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType, max_history: usize) -> Self {
        BuiltInDefinition {
            name: name.into(),
            parameter_type,
            max_history,
        }
    }

    /// Address this parameter is normally received on
    pub fn canonical_address(&self) -> String {
        canonical_address(&self.name)
    }

    fn validate(&self) -> AvoscResult<()> {
        if self.name.is_empty() {
            return Err(AvoscError::InvalidDefinition(
                "built-in parameter name is empty".into(),
            ));
        }
        if self.max_history == 0 {
            return Err(AvoscError::InvalidDefinition(format!(
                "{}: max_history must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

/// Canonical address for a parameter name
pub fn canonical_address(name: &str) -> String {
    if name == AVATAR_CHANGE_NAME {
        AVATAR_CHANGE_ADDRESS.to_string()
    } else if name.starts_with('/') {
        name.to_string()
    } else {
        format!("{}{}", AVATAR_PARAMETER_PREFIX, name)
    }
}

/// Immutable set of built-in parameter definitions
#[derive(Clone, Debug, Default)]
pub struct ParameterRegistry {
    /// Definitions in registration order
    definitions: Vec<BuiltInDefinition>,
    /// Name -> index into `definitions`
    index: HashMap<String, usize>,
}

impl ParameterRegistry {
    /// Empty registry (every parameter is dynamic)
    pub fn new() -> Self {
        ParameterRegistry::default()
    }

    /// Build from definitions, rejecting empty names, zero history and duplicates
    pub fn from_definitions<I>(definitions: I) -> AvoscResult<Self>
    where
        I: IntoIterator<Item = BuiltInDefinition>,
    {
        let mut registry = ParameterRegistry::new();

        for def in definitions {
            def.validate()?;
            if registry.index.contains_key(&def.name) {
                return Err(AvoscError::InvalidDefinition(format!(
                    "duplicate built-in parameter: {}",
                    def.name
                )));
            }
            registry
                .index
                .insert(def.name.clone(), registry.definitions.len());
            registry.definitions.push(def);
        }

        Ok(registry)
    }

    /// The standard avatar built-in parameters
    pub fn avatar_defaults() -> Self {
        let mut registry = ParameterRegistry::new();
        for def in avatar_default_definitions() {
            registry.index.insert(def.name.clone(), registry.definitions.len());
            registry.definitions.push(def);
        }
        registry
    }

    /// Look up a built-in definition by name
    #[inline]
    pub fn lookup_built_in(&self, name: &str) -> Option<&BuiltInDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = &BuiltInDefinition> {
        self.definitions.iter()
    }
}

/// Definitions behind [`ParameterRegistry::avatar_defaults`]
pub fn avatar_default_definitions() -> Vec<BuiltInDefinition> {
    use ParameterType::*;

    [
        ("IsLocal", Boolean),
        ("Viseme", Int32),
        ("Voice", Single),
        ("GestureLeft", Int32),
        ("GestureRight", Int32),
        ("GestureLeftWeight", Single),
        ("GestureRightWeight", Single),
        ("AngularY", Single),
        ("VelocityX", Single),
        ("VelocityY", Single),
        ("VelocityZ", Single),
        ("VelocityMagnitude", Single),
        ("Upright", Single),
        ("Grounded", Boolean),
        ("Seated", Boolean),
        ("AFK", Boolean),
        ("TrackingType", Int32),
        ("VRMode", Int32),
        ("MuteSelf", Boolean),
        ("InStation", Boolean),
        ("Earmuffs", Boolean),
        ("IsOnFriendsList", Boolean),
        ("AvatarVersion", Int32),
        ("ScaleModified", Boolean),
        ("ScaleFactor", Single),
        ("ScaleFactorInverse", Single),
        ("EyeHeightAsMeters", Single),
        ("EyeHeightAsPercent", Single),
        (AVATAR_CHANGE_NAME, String),
    ]
    .into_iter()
    .map(|(name, ty)| BuiltInDefinition::new(name, ty, default_max_history()))
    .collect()
}
