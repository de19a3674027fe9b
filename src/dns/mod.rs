pub mod common;
pub mod enums;
pub mod header;
pub mod packet;
pub mod question;
pub mod resource;

pub use header::DNSHeader;
pub use packet::DNSPacket;
pub use question::DNSQuestion;
pub use resource::DNSResource;

use thiserror::Error;

/// Wire-level encoding/decoding errors
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("invalid DNS header")]
    InvalidHeader,
    #[error("invalid DNS label")]
    InvalidLabel,
    #[error("domain name too long")]
    NameTooLong,
    #[error("invalid question section")]
    InvalidQuestionSection,
    #[error("invalid answer section")]
    InvalidAnswerSection,
    #[error("invalid authority section")]
    InvalidAuthoritySection,
    #[error("invalid additional section")]
    InvalidAdditionalSection,
    #[error("invalid bit stream: {0}")]
    InvalidBitStream(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::InvalidBitStream(err.to_string())
    }
}
