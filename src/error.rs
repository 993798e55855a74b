//! Error types for certificate generation.
//!
//! Only writer/codec failures abort a generation. Per-image problems are
//! reported through [`crate::writer::ImageError`] and handled where the
//! signature is placed.

/// Result type alias for certificate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a certificate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document writer or an encoder could not produce output
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Incident record could not be parsed
    #[error("Invalid incident record: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error() {
        let err = Error::Encoding("xref overflow".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Encoding error"));
        assert!(msg.contains("xref overflow"));
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("BRIEFING_COMPRESS=maybe".to_string());
        assert!(format!("{}", err).contains("BRIEFING_COMPRESS=maybe"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(format!("{}", err).contains("Invalid incident record"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
