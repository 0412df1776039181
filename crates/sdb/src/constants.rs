//! Wire-format constants.

/// The supported document format version, written as the first byte of
/// every encoded document.
pub const FORMAT_VERSION: u8 = 0;

/// Maximum byte length of a length-prefixed text payload (name,
/// description, named host); longer values are truncated.
pub const MAX_TEXT_LEN: usize = 0xffff;

/// Maximum byte length of a parameters payload; longer values are
/// truncated.
pub const MAX_PARAMETERS_LEN: usize = 0xff_ffff;

/// Host payload subtype: 4 raw IPv4 octets.
pub const HOST_IPV4: u8 = 0;

/// Host payload subtype reserved for IPv6. Never emitted; both encode and
/// decode reject it.
pub const HOST_IPV6: u8 = 1;

/// Host payload subtype: length-prefixed named host.
pub const HOST_NAMED: u8 = 2;
