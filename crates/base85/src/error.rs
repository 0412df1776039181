use thiserror::Error;

/// Error type for Base85 decoding.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Base85Error {
    #[error("unexpected character with code {code:#04x} at position {position}")]
    UnexpectedChar { code: u8, position: usize },
    #[error("unexpected 'z' inside a group at position {position}")]
    UnexpectedZero { position: usize },
    #[error("broken end-of-data marker at position {position}")]
    BrokenEod { position: usize },
}
