//! OSC messages and datagram decoding
//!
//! A datagram holds exactly one OSC packet: either a message or a bundle.
//! Packets are 4-byte aligned; anything else is rejected before decoding.

use avosc_core::{AvoscError, AvoscResult};
use rosc::{OscBundle, OscMessage, OscPacket};

/// Raw OSC argument as decoded from the wire
pub use rosc::OscType as Argument;

/// Largest payload a UDP datagram can carry over IPv4
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// OSC packet alignment
pub const OSC_ALIGNMENT: usize = 4;

/// Decoded OSC message
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Slash-delimited address, e.g. `/avatar/parameters/Viseme`
    pub address: String,
    /// Arguments in wire order
    pub arguments: Vec<Argument>,
}

impl Message {
    pub fn new(address: impl Into<String>) -> Self {
        Message {
            address: address.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// The only argument the dispatcher consults
    #[inline]
    pub fn first_argument(&self) -> Option<&Argument> {
        self.arguments.first()
    }

    #[inline]
    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Encode as a standalone datagram
    pub fn encode(&self) -> AvoscResult<Vec<u8>> {
        validate_address(&self.address)?;
        let packet = OscPacket::Message(OscMessage {
            addr: self.address.clone(),
            args: self.arguments.clone(),
        });
        rosc::encoder::encode(&packet)
            .map_err(|e| AvoscError::MalformedMessage(format!("encode failed: {:?}", e)))
    }

    fn from_osc(msg: OscMessage) -> AvoscResult<Self> {
        validate_address(&msg.addr)?;
        Ok(Message {
            address: msg.addr,
            arguments: msg.args,
        })
    }
}

/// One decoded datagram
#[derive(Clone, Debug, PartialEq)]
pub enum Datagram {
    Message(Message),
    /// Bundle contents in wire order (nested bundles kept nested)
    Bundle(Vec<Datagram>),
}

impl Datagram {
    fn from_packet(packet: OscPacket) -> AvoscResult<Self> {
        match packet {
            OscPacket::Message(msg) => Ok(Datagram::Message(Message::from_osc(msg)?)),
            OscPacket::Bundle(OscBundle { content, .. }) => {
                let inner = content
                    .into_iter()
                    .map(Datagram::from_packet)
                    .collect::<AvoscResult<Vec<_>>>()?;
                Ok(Datagram::Bundle(inner))
            }
        }
    }

    /// Number of messages, counting into nested bundles
    pub fn message_count(&self) -> usize {
        match self {
            Datagram::Message(_) => 1,
            Datagram::Bundle(inner) => inner.iter().map(Datagram::message_count).sum(),
        }
    }
}

/// Decode a datagram, rejecting anything above [`MAX_DATAGRAM_SIZE`]
pub fn decode(buf: &[u8]) -> AvoscResult<Datagram> {
    decode_with_limit(buf, MAX_DATAGRAM_SIZE)
}

/// Decode a datagram with a custom size limit
pub fn decode_with_limit(buf: &[u8], limit: usize) -> AvoscResult<Datagram> {
    if buf.is_empty() {
        return Err(AvoscError::MalformedMessage("empty datagram".into()));
    }

    if buf.len() > limit {
        return Err(AvoscError::MalformedMessage(format!(
            "datagram too large: {} > {}",
            buf.len(),
            limit
        )));
    }

    if buf.len() % OSC_ALIGNMENT != 0 {
        return Err(AvoscError::MalformedMessage(format!(
            "datagram length {} is not {}-byte aligned",
            buf.len(),
            OSC_ALIGNMENT
        )));
    }

    let (rest, packet) = rosc::decoder::decode_udp(buf)
        .map_err(|e| AvoscError::MalformedMessage(format!("{:?}", e)))?;

    if !rest.is_empty() {
        return Err(AvoscError::MalformedMessage(format!(
            "{} trailing bytes after packet",
            rest.len()
        )));
    }

    Datagram::from_packet(packet)
}

fn validate_address(address: &str) -> AvoscResult<()> {
    if !address.starts_with('/') {
        return Err(AvoscError::MalformedMessage(format!(
            "address must start with '/': {:?}",
            address
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rosc::OscTime;

    fn encode_bundle(messages: Vec<Message>) -> Vec<u8> {
        let content = messages
            .into_iter()
            .map(|m| {
                OscPacket::Message(OscMessage {
                    addr: m.address,
                    args: m.arguments,
                })
            })
            .collect();
        let bundle = OscPacket::Bundle(OscBundle {
            timetag: OscTime {
                seconds: 0,
                fractional: 1,
            },
            content,
        });
        rosc::encoder::encode(&bundle).unwrap()
    }

    #[test]
    fn test_decode_message() {
        let bytes = Message::new("/avatar/parameters/Viseme")
            .with_argument(Argument::Int(3))
            .encode()
            .unwrap();

        match decode(&bytes).unwrap() {
            Datagram::Message(msg) => {
                assert_eq!(msg.address, "/avatar/parameters/Viseme");
                assert_eq!(msg.first_argument(), Some(&Argument::Int(3)));
            }
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_keeps_extra_arguments() {
        let bytes = Message::new("/avatar/parameters/Pair")
            .with_argument(Argument::Float(0.25))
            .with_argument(Argument::String("ignored".into()))
            .encode()
            .unwrap();

        let Datagram::Message(msg) = decode(&bytes).unwrap() else {
            panic!("expected message");
        };
        assert_eq!(msg.arguments.len(), 2);
        assert_eq!(msg.first_argument(), Some(&Argument::Float(0.25)));
    }

    #[test]
    fn test_decode_no_arguments() {
        let bytes = Message::new("/avatar/change").encode().unwrap();
        let Datagram::Message(msg) = decode(&bytes).unwrap() else {
            panic!("expected message");
        };
        assert!(!msg.has_arguments());
    }

    #[test]
    fn test_decode_bool_tags() {
        let bytes = Message::new("/avatar/parameters/AFK")
            .with_argument(Argument::Bool(true))
            .encode()
            .unwrap();
        let Datagram::Message(msg) = decode(&bytes).unwrap() else {
            panic!("expected message");
        };
        assert_eq!(msg.first_argument(), Some(&Argument::Bool(true)));
    }

    #[test]
    fn test_decode_bundle() {
        let bytes = encode_bundle(vec![
            Message::new("/avatar/parameters/A").with_argument(Argument::Int(1)),
            Message::new("/avatar/parameters/B").with_argument(Argument::Int(2)),
        ]);

        let datagram = decode(&bytes).unwrap();
        assert!(matches!(datagram, Datagram::Bundle(_)));
        assert_eq!(datagram.message_count(), 2);
    }

    #[test]
    fn test_reject_empty() {
        assert!(matches!(decode(&[]), Err(AvoscError::MalformedMessage(_))));
    }

    #[test]
    fn test_reject_truncated() {
        let bytes = Message::new("/avatar/parameters/Voice")
            .with_argument(Argument::Float(0.5))
            .encode()
            .unwrap();

        // Drop the float payload
        let truncated = &bytes[..bytes.len() - 4];
        assert!(matches!(
            decode(truncated),
            Err(AvoscError::MalformedMessage(_))
        ));

        // Unaligned cut
        let truncated = &bytes[..bytes.len() - 3];
        assert!(matches!(
            decode(truncated),
            Err(AvoscError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_reject_trailing_bytes() {
        let mut bytes = Message::new("/avatar/parameters/Viseme")
            .with_argument(Argument::Int(3))
            .encode()
            .unwrap();
        bytes.extend_from_slice(&[0, 0, 0, 1]);

        assert!(matches!(
            decode(&bytes),
            Err(AvoscError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_reject_oversized() {
        let bytes = Message::new("/avatar/parameters/Viseme")
            .with_argument(Argument::Int(3))
            .encode()
            .unwrap();

        assert!(matches!(
            decode_with_limit(&bytes, bytes.len() - 4),
            Err(AvoscError::MalformedMessage(_))
        ));
        assert!(decode_with_limit(&bytes, bytes.len()).is_ok());
    }

    #[test]
    fn test_encode_rejects_relative_address() {
        let msg = Message::new("avatar/parameters/Viseme").with_argument(Argument::Int(1));
        assert!(matches!(msg.encode(), Err(AvoscError::MalformedMessage(_))));
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&bytes);
        }

        #[test]
        fn decode_never_panics_on_aligned_garbage(words in proptest::collection::vec(any::<u32>(), 0..64)) {
            let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
            let _ = decode(&bytes);
        }
    }
}
