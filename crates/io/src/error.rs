//! Error type shared by the binary reader/writer and every `Serializable` impl.

use thiserror::Error;

/// I/O and (de)serialization errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("buffer overflow")]
    BufferOverflow,

    #[error("unexpected end of stream")]
    EndOfStream,

    #[error("format exception: {0}")]
    FormatException(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<std::io::Error> for IoError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => IoError::EndOfStream,
            _ => IoError::Io(error.to_string()),
        }
    }
}

impl From<std::string::FromUtf8Error> for IoError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        IoError::InvalidData(format!("invalid utf8: {error}"))
    }
}

impl From<std::str::Utf8Error> for IoError {
    fn from(error: std::str::Utf8Error) -> Self {
        IoError::InvalidData(format!("invalid utf8: {error}"))
    }
}

impl From<std::array::TryFromSliceError> for IoError {
    fn from(error: std::array::TryFromSliceError) -> Self {
        IoError::InvalidData(format!("slice conversion failed: {error}"))
    }
}

impl From<std::num::ParseIntError> for IoError {
    fn from(error: std::num::ParseIntError) -> Self {
        IoError::InvalidData(format!("integer parse failed: {error}"))
    }
}

/// Alias kept for call sites that predate the `IoError` rename.
pub type Error = IoError;

/// Result type for I/O operations.
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Alias used throughout the crate.
pub type Result<T> = IoResult<T>;
