//! The binary document codec: record framing and field tag dispatch.
//!
//! ```text
//! document := version:u8  record+
//! record   := kind:u8  fieldsLen:u32(BE)  field*
//! field    := tag:u8  payload
//! ```

mod decoder;
mod encoder;

pub use decoder::DocumentDecoder;
pub use encoder::DocumentEncoder;

use crate::descriptor::FieldKind;

/// One-byte field discriminant written before each field payload.
///
/// Tags 7..=11 are back-references: their payload is a u16 index into the
/// history table instead of a literal value. Transport and protocol have
/// no reference tag and always encode verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    Name = 0,
    Description = 1,
    Transport = 2,
    Protocol = 3,
    Host = 4,
    Port = 5,
    Parameters = 6,
    NameRef = 7,
    DescriptionRef = 8,
    HostRef = 9,
    PortRef = 10,
    ParametersRef = 11,
}

impl FieldTag {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Name),
            1 => Some(Self::Description),
            2 => Some(Self::Transport),
            3 => Some(Self::Protocol),
            4 => Some(Self::Host),
            5 => Some(Self::Port),
            6 => Some(Self::Parameters),
            7 => Some(Self::NameRef),
            8 => Some(Self::DescriptionRef),
            9 => Some(Self::HostRef),
            10 => Some(Self::PortRef),
            11 => Some(Self::ParametersRef),
            _ => None,
        }
    }

    /// The back-reference tag for a field kind, if that kind is
    /// dedup-referenceable.
    pub fn ref_for(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Name => Some(Self::NameRef),
            FieldKind::Description => Some(Self::DescriptionRef),
            FieldKind::Host => Some(Self::HostRef),
            FieldKind::Port => Some(Self::PortRef),
            FieldKind::Parameters => Some(Self::ParametersRef),
            FieldKind::Transport | FieldKind::Protocol | FieldKind::Url => None,
        }
    }

    /// The field kind a back-reference tag resolves to.
    pub fn ref_kind(&self) -> Option<FieldKind> {
        match self {
            Self::NameRef => Some(FieldKind::Name),
            Self::DescriptionRef => Some(FieldKind::Description),
            Self::HostRef => Some(FieldKind::Host),
            Self::PortRef => Some(FieldKind::Port),
            Self::ParametersRef => Some(FieldKind::Parameters),
            _ => None,
        }
    }
}
