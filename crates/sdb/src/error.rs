use sdb_base85::Base85Error;
use sdb_buffers::BufferError;
use thiserror::Error;

/// Boxed error produced by a caller-supplied transform stage.
pub type StageError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for SDB encoding and decoding.
#[derive(Debug, Error)]
pub enum SdbError {
    /// Encode was attempted with no record list set on the bundle.
    #[error("no service descriptor data to encode")]
    NoData,
    /// The decoded version byte differs from [`crate::FORMAT_VERSION`].
    #[error("document version {found} does not match supported version {supported}")]
    VersionMismatch { found: u8, supported: u8 },
    /// A record frame carried an entity kind byte outside the known set.
    #[error("unknown entity kind byte {0:#04x}")]
    InvalidKind(u8),
    /// IPv6 hosts have a reserved subtype but no payload encoding.
    #[error("IPv6 hosts are not supported by the wire format")]
    Ipv6Unsupported,
    /// A back-reference field had no prior history entry of its kind.
    #[error("back-reference to a field with no prior history entry")]
    DanglingReference,
    /// A JSON record value did not fit the descriptor model.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// A compact-form `url` field failed to parse.
    #[error("invalid entity url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A compact-form `url` field used a scheme outside the protocol enum.
    #[error("url scheme `{0}` has no protocol encoding")]
    UnsupportedScheme(String),
    #[error(transparent)]
    Base85(#[from] Base85Error),
    #[error("invalid base64 text: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// A transform stage reported a failure; fatal to the current call.
    #[error("transform stage failed: {0}")]
    Stage(#[source] StageError),
}
