//! Message classification and store updates
//!
//! Address resolution, in order, first match wins (literal, case-sensitive):
//! 1. `/avatar/parameters/<name>` -> `<name>`
//! 2. `/avatar/change`            -> `AvatarChange`
//! 3. anything else               -> the address itself
//!
//! A name found in the registry is a built-in; anything else is dynamic.

use std::sync::Arc;

use avosc_core::{AvoscError, AvoscResult, DropReason, ParameterEvent};
use avosc_state::{
    DynamicUpdate, AVATAR_CHANGE_ADDRESS, AVATAR_CHANGE_NAME, AVATAR_PARAMETER_PREFIX,
};
use avosc_wire::{classify_type, decode_with_limit, to_parameter_value, ArgumentKind, Datagram, Message};

use crate::{ListenerStats, ParameterContext};

/// Which address shape matched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressKind {
    AvatarParameter,
    AvatarChange,
    Other,
}

/// Resolve an address to the parameter name it refers to
pub fn resolve_name(address: &str) -> (AddressKind, &str) {
    if let Some(name) = address.strip_prefix(AVATAR_PARAMETER_PREFIX) {
        (AddressKind::AvatarParameter, name)
    } else if address == AVATAR_CHANGE_ADDRESS {
        (AddressKind::AvatarChange, AVATAR_CHANGE_NAME)
    } else {
        (AddressKind::Other, address)
    }
}

/// Applies decoded messages to the parameter store
#[derive(Clone, Debug)]
pub struct Dispatcher {
    context: Arc<ParameterContext>,
    stats: Arc<ListenerStats>,
}

impl Dispatcher {
    pub fn new(context: Arc<ParameterContext>) -> Self {
        Self::with_stats(context, Arc::new(ListenerStats::new()))
    }

    pub fn with_stats(context: Arc<ParameterContext>, stats: Arc<ListenerStats>) -> Self {
        Dispatcher { context, stats }
    }

    pub fn context(&self) -> &Arc<ParameterContext> {
        &self.context
    }

    pub fn stats(&self) -> &Arc<ListenerStats> {
        &self.stats
    }

    /// Decode and apply one datagram.
    ///
    /// Never fails: per-message errors come back as a single
    /// `MessageDropped` event.
    pub fn handle_datagram(&self, buf: &[u8]) -> Vec<ParameterEvent> {
        self.stats.record_datagram();

        match decode_with_limit(buf, self.context.max_datagram_size()) {
            Ok(Datagram::Message(message)) => self.handle_message(&message),
            Ok(bundle @ Datagram::Bundle(_)) => {
                self.stats.record_bundle_ignored();
                tracing::debug!(
                    messages = bundle.message_count(),
                    "Ignoring OSC bundle"
                );
                Vec::new()
            }
            Err(err) => vec![self.dropped(err, None)],
        }
    }

    /// Apply one decoded message, reporting failures as `MessageDropped`
    pub fn handle_message(&self, message: &Message) -> Vec<ParameterEvent> {
        match self.dispatch(message) {
            Ok(events) => events,
            Err(err) => vec![self.dropped(err, Some(&message.address))],
        }
    }

    /// Apply one decoded message to the store.
    ///
    /// Messages without arguments are a no-op. Only the first argument is
    /// consulted; the rest are ignored.
    pub fn dispatch(&self, message: &Message) -> AvoscResult<Vec<ParameterEvent>> {
        let Some(argument) = message.first_argument() else {
            self.stats.record_empty_ignored();
            tracing::trace!(address = %message.address, "Ignoring message without arguments");
            return Ok(Vec::new());
        };

        let (_, name) = resolve_name(&message.address);
        if name.is_empty() {
            return Err(AvoscError::MalformedMessage(format!(
                "empty parameter name in {:?}",
                message.address
            )));
        }

        let actual = classify_type(ArgumentKind::of(argument))?;
        let store = self.context.store();

        match self.context.registry().lookup_built_in(name) {
            Some(definition) => {
                if actual != definition.parameter_type {
                    return Err(AvoscError::TypeMismatch {
                        name: name.to_string(),
                        expected: definition.parameter_type,
                        actual,
                    });
                }

                let value = to_parameter_value(argument)?;
                store.apply_built_in(name, &message.address, value.clone())?;
                self.stats.record_built_in_update();
                tracing::debug!(name, address = %message.address, %value, "Built-in parameter updated");

                Ok(vec![ParameterEvent::BuiltInParameterUpdated {
                    name: name.to_string(),
                    value,
                }])
            }
            None => {
                let value = to_parameter_value(argument)?;
                let outcome = store.apply_dynamic(name, &message.address, value.clone())?;
                let mut events = Vec::with_capacity(2);

                if outcome == DynamicUpdate::Created {
                    self.stats.record_dynamic_created();
                    tracing::info!(
                        name,
                        address = %message.address,
                        "Dynamic parameter ++ [{}] type ({}) added and set to {} | history allowed: {}",
                        name,
                        actual,
                        value,
                        store.dynamic_history()
                    );
                    events.push(ParameterEvent::DynamicParameterCreated {
                        name: name.to_string(),
                        parameter_type: actual,
                        max_history: store.dynamic_history(),
                    });
                }

                self.stats.record_dynamic_update();
                tracing::debug!(name, address = %message.address, %value, "Dynamic parameter updated");
                events.push(ParameterEvent::DynamicParameterUpdated {
                    name: name.to_string(),
                    value,
                });

                Ok(events)
            }
        }
    }

    fn dropped(&self, err: AvoscError, address: Option<&str>) -> ParameterEvent {
        // The store's built-in keys come from the same registry the lookup
        // used, so only per-message errors reach here in practice.
        let reason = err.drop_reason().unwrap_or(DropReason::MalformedMessage);
        self.stats.record_drop(reason);

        let detail = match address {
            Some(address) => format!("{}: {}", address, err),
            None => err.to_string(),
        };
        tracing::warn!(%reason, "Dropped message: {}", detail);

        ParameterEvent::MessageDropped { reason, detail }
    }
}
