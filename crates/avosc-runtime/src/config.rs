//! Listener configuration
//!
//! Loaded once at startup (JSON) and turned into a [`ParameterContext`].
//!
//! [`ParameterContext`]: crate::ParameterContext

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use avosc_core::{AvoscError, AvoscResult};
use avosc_state::{avatar_default_definitions, BuiltInDefinition, DEFAULT_DYNAMIC_HISTORY};
use avosc_wire::MAX_DATAGRAM_SIZE;
use serde::{Deserialize, Serialize};

use crate::LogFormat;

/// Port avatar clients send OSC output to by default
pub const DEFAULT_LISTEN_PORT: u16 = 9001;

/// Listener configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Local address to bind
    pub bind_host: IpAddr,
    /// UDP port to listen on
    pub listen_port: u16,
    /// Built-in parameter definitions
    pub built_in: Vec<BuiltInDefinition>,
    /// History depth for dynamic parameters
    pub dynamic_history: usize,
    /// Largest datagram accepted
    pub max_datagram_size: usize,
    pub log_format: LogFormat,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        ListenerConfig {
            bind_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            listen_port: DEFAULT_LISTEN_PORT,
            built_in: avatar_default_definitions(),
            dynamic_history: DEFAULT_DYNAMIC_HISTORY,
            max_datagram_size: MAX_DATAGRAM_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl ListenerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> AvoscResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AvoscError::Config(format!("failed to read {:?}: {}", path, e)))?;
        Self::from_json(&content)
            .map_err(|e| AvoscError::Config(format!("{:?}: {}", path, e)))
    }

    /// Parse and validate JSON config text
    pub fn from_json(text: &str) -> AvoscResult<Self> {
        let config: ListenerConfig =
            serde_json::from_str(text).map_err(|e| AvoscError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AvoscResult<()> {
        if self.dynamic_history == 0 {
            return Err(AvoscError::Config(
                "dynamic_history must be positive".into(),
            ));
        }

        if self.max_datagram_size == 0 || self.max_datagram_size > MAX_DATAGRAM_SIZE {
            return Err(AvoscError::Config(format!(
                "max_datagram_size must be within 1..={}",
                MAX_DATAGRAM_SIZE
            )));
        }

        avosc_state::ParameterRegistry::from_definitions(self.built_in.iter().cloned())?;
        Ok(())
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.listen_port = port;
        self
    }

    pub fn with_bind_host(mut self, host: IpAddr) -> Self {
        self.bind_host = host;
        self
    }

    pub fn with_built_in(mut self, definitions: Vec<BuiltInDefinition>) -> Self {
        self.built_in = definitions;
        self
    }

    pub fn with_dynamic_history(mut self, depth: usize) -> Self {
        self.dynamic_history = depth;
        self
    }
}
