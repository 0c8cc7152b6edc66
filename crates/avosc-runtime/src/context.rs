//! Shared parameter context
//!
//! Built once at startup and handed, behind an `Arc`, to the listener and to
//! every consumer that reads parameter state.

use std::net::{IpAddr, Ipv4Addr};

use avosc_core::AvoscResult;
use avosc_state::{ParameterRegistry, ParameterStore};
use avosc_wire::MAX_DATAGRAM_SIZE;

use crate::ListenerConfig;

/// Registry, store and network settings for one listener
#[derive(Debug)]
pub struct ParameterContext {
    registry: ParameterRegistry,
    store: ParameterStore,
    bind_host: IpAddr,
    listen_port: u16,
    max_datagram_size: usize,
}

impl ParameterContext {
    /// Context bound to loopback with default limits
    pub fn new(registry: ParameterRegistry, listen_port: u16) -> Self {
        let store = ParameterStore::new(&registry);
        ParameterContext {
            registry,
            store,
            bind_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            listen_port,
            max_datagram_size: MAX_DATAGRAM_SIZE,
        }
    }

    pub fn from_config(config: &ListenerConfig) -> AvoscResult<Self> {
        config.validate()?;
        let registry = ParameterRegistry::from_definitions(config.built_in.iter().cloned())?;
        let store = ParameterStore::with_dynamic_history(&registry, config.dynamic_history);

        Ok(ParameterContext {
            registry,
            store,
            bind_host: config.bind_host,
            listen_port: config.listen_port,
            max_datagram_size: config.max_datagram_size,
        })
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn bind_host(&self) -> IpAddr {
        self.bind_host
    }

    /// Configured port
    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    pub fn max_datagram_size(&self) -> usize {
        self.max_datagram_size
    }
}
