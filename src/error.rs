//! The error taxonomy used across decoding, encoding, transport and the
//! client façade.

use std::io;

use thiserror::Error;

use ipp_types::error::UnknownAttributeError;
use ipp_types::tag::{TagError, ValueTag};

/// Failure to turn a byte stream into a [`ipp_types::Request`] or
/// [`ipp_types::Response`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while decoding {0}")]
    UnexpectedEof(&'static str),
    #[error("malformed tag byte: {0}")]
    Tag(#[from] TagError),
    #[error("value tag {tag:?} is not valid for the \"{context}\" position")]
    UnexpectedTag {
        tag: ipp_types::tag::ValueTag,
        context: &'static str,
    },
    #[error("string value is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("collection is missing its terminating end-collection marker")]
    UnterminatedCollection,
    #[error("value length {0} exceeds the maximum permitted by the protocol")]
    ValueTooLarge(u32),
    #[error("I/O error while reading: {0}")]
    Io(#[from] io::Error),
    #[error("malformed integer encoding: {0}")]
    Integer(&'static str),
    #[error("length field {0} is negative")]
    NegativeLength(i16),
}

/// Failure to turn a [`ipp_types::Request`] into bytes. Encoding an
/// in-memory data model to a well-formed wire format is, by construction,
/// far less likely to fail than decoding untrusted bytes, but string
/// lengths are still bounds-checked.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    UnknownAttribute(#[from] UnknownAttributeError),
    #[error("attribute \"{name}\" is declared as {expected:?} but the value given has tag {found:?}")]
    TagTypeMismatch {
        name: String,
        expected: ValueTag,
        found: ValueTag,
    },
    #[error("value for attribute \"{0}\" is longer than 65535 bytes")]
    ValueTooLong(String),
    #[error("I/O error while writing: {0}")]
    Io(#[from] io::Error),
}

/// Failure at the transport layer: connecting, sending, or reading the
/// HTTP envelope around an IPP message.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("server returned HTTP status {0}")]
    UnexpectedStatus(u16),
    #[error("response is missing the expected Content-Type")]
    MissingContentType,
    #[error("could not locate a CUPS domain socket (checked {0} candidate paths)")]
    SocketNotFound(usize),
    #[error("CUPS local authentication failed after retrying with the auth cookie")]
    LocalAuthFailed,
    #[error("malformed HTTP response from server")]
    MalformedResponse,
    #[error("operation canceled")]
    Canceled,
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::Http(Box::new(err))
    }
}

/// The top-level error a [`crate::client::Client`] method returns.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("printer rejected the request: {status:?} (request id {request_id}): {message}")]
    Rejected {
        status: i16,
        request_id: i32,
        unsupported: Vec<String>,
        message: String,
    },
}

/// The exact `status-message` CUPS sends for `client-error-not-found` when
/// the named printer or class doesn't exist, per `go-ipp`'s `IsNotExistsError`.
const PRINTER_NOT_FOUND_MESSAGE: &str = "The printer or class does not exist.";

impl ClientError {
    /// Whether a [`ClientError::Rejected`] is specifically "no such printer
    /// or class". CUPS reuses `client-error-not-found` for several kinds of
    /// missing resource, so this matches the decoded `status-message` text
    /// rather than the status code.
    pub fn is_printer_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::Rejected { message, .. } if message == PRINTER_NOT_FOUND_MESSAGE
        )
    }
}
