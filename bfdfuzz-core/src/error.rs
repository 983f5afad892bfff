//! Error types for the BFD fuzz harness

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
///
/// The packet codec never fails, so nothing here describes an encoding
/// problem. A target that stops answering is not an error either: the
/// liveness oracle reports it as a value.
#[derive(Error, Debug)]
pub enum Error {
    /// Local socket I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fuzz datagram could not be handed to the network
    #[error("Send failed: {0}")]
    Send(String),

    /// The liveness exchange failed for a reason other than reachability
    #[error("Liveness probe error: {0}")]
    Probe(String),

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Target address not usable by the selected transport
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),

    /// Insufficient privileges
    #[error("Insufficient privileges: {0}")]
    InsufficientPrivileges(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Create a send error with a custom message
    pub fn send<S: Into<String>>(msg: S) -> Self {
        Error::Send(msg.into())
    }

    /// Create a probe error with a custom message
    pub fn probe<S: Into<String>>(msg: S) -> Self {
        Error::Probe(msg.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = Error::invalid_parameter("scenario", "unknown name 'bogus'");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'scenario': unknown name 'bogus'"
        );
    }
}
