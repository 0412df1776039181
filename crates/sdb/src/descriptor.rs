//! The service descriptor data model.
//!
//! Every wire concept is a closed sum type: one variant per entity kind,
//! one per field, so tag dispatch in the codec is exhaustive.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// The kind of a descriptor record, encoded as the record's single-byte
/// frame header rather than a tagged field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Api = 0,
    P2p = 1,
    Peer = 2,
}

impl EntityKind {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Api),
            1 => Some(Self::P2p),
            2 => Some(Self::Peer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::P2p => "p2p",
            Self::Peer => "peer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "api" => Some(Self::Api),
            "p2p" => Some(Self::P2p),
            "peer" => Some(Self::Peer),
            _ => None,
        }
    }
}

/// Transport of a service endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http = 0,
    Wss = 1,
    WebRtc = 2,
}

impl Transport {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Http),
            1 => Some(Self::Wss),
            2 => Some(Self::WebRtc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Wss => "wss",
            Self::WebRtc => "webrtc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Self::Http),
            "wss" => Some(Self::Wss),
            "webrtc" => Some(Self::WebRtc),
            _ => None,
        }
    }
}

/// Application protocol of a service endpoint.
///
/// `Ws` and `Wss` share wire discriminant 2, so a decoded 2 always yields
/// `Ws`; the two are indistinguishable once encoded. Discriminant 3 is
/// accepted on decode as `Wss` even though no encoder emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
    Ws,
    Wss,
}

impl Protocol {
    /// The wire discriminant; note the `Ws`/`Wss` collision.
    pub fn wire_value(&self) -> u8 {
        match self {
            Self::Http => 0,
            Self::Https => 1,
            Self::Ws | Self::Wss => 2,
        }
    }

    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Http),
            1 => Some(Self::Https),
            2 => Some(Self::Ws),
            3 => Some(Self::Wss),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Ws => "ws",
            Self::Wss => "wss",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "ws" => Some(Self::Ws),
            "wss" => Some(Self::Wss),
            _ => None,
        }
    }
}

/// A service host: an IPv4 literal, a named host, or an IPv6 literal.
///
/// IPv6 hosts are representable in the model but rejected by the wire
/// codec (the subtype is reserved with no payload layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Named(String),
}

impl Host {
    /// Classifies a host string via address parsing; anything that is not
    /// an IP literal is a named host.
    pub fn parse(s: &str) -> Self {
        if let Ok(v4) = s.parse::<Ipv4Addr>() {
            return Self::Ipv4(v4);
        }
        if let Ok(v6) = s.parse::<Ipv6Addr>() {
            return Self::Ipv6(v6);
        }
        Self::Named(s.to_owned())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4(addr) => fmt::Display::fmt(addr, f),
            Self::Ipv6(addr) => fmt::Display::fmt(addr, f),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// One named, typed attribute of a record.
///
/// `Url` is compact-form input sugar: the record codec decomposes it into
/// `Protocol`/`Host`/`Port`/`Parameters` at encode time, so it never
/// appears on the wire or in decoded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name(String),
    Description(String),
    Transport(Transport),
    Protocol(Protocol),
    Host(Host),
    Port(u16),
    Parameters(Vec<u8>),
    Url(String),
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Name(_) => FieldKind::Name,
            Self::Description(_) => FieldKind::Description,
            Self::Transport(_) => FieldKind::Transport,
            Self::Protocol(_) => FieldKind::Protocol,
            Self::Host(_) => FieldKind::Host,
            Self::Port(_) => FieldKind::Port,
            Self::Parameters(_) => FieldKind::Parameters,
            Self::Url(_) => FieldKind::Url,
        }
    }
}

/// The name part of a field, used as the history-table grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Description,
    Transport,
    Protocol,
    Host,
    Port,
    Parameters,
    Url,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Host => "host",
            Self::Port => "port",
            Self::Parameters => "parameters",
            Self::Url => "url",
        }
    }
}

/// One service descriptor entry: an entity kind plus ordered fields.
///
/// Field order is significant: it is the encode iteration order, and
/// decoding reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub kind: EntityKind,
    pub fields: Vec<Field>,
}

impl ServiceRecord {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    /// Builder-style field append.
    pub fn with(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// First field of the given kind, if any.
    pub fn get(&self, kind: FieldKind) -> Option<&Field> {
        self.fields.iter().find(|f| f.kind() == kind)
    }
}
