use std::sync::Arc;
use thiserror::Error;

/// Unified error type for the dnsup update client
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    // Directive and RR parsing errors
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not supported")]
    NotSupported,

    // Message assembly errors
    #[error("failed to build update message: {0}")]
    Build(String),

    // Network errors
    #[error("connection refused after {0} attempts")]
    ConnectionRefused(u32),
    #[error("operation timed out")]
    Timeout,
    #[error("IO error: {0}")]
    IoError(Arc<std::io::Error>),

    // TSIG signing/verification errors
    #[error("TSIG error: {0}")]
    Tsig(String),
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::IoError(Arc::new(err))
    }
}

impl From<crate::dns::ParseError> for ClientError {
    fn from(err: crate::dns::ParseError) -> Self {
        ClientError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
