#![deny(missing_debug_implementations)]

//! Encoding, decoding, transport and client logic for the Internet Printing
//! Protocol, built on the wire-agnostic data model in `ipp-types`.

pub mod attribute;
pub mod client;
pub mod error;
pub mod message;
pub mod transport;

pub use client::{Client, JobAttributes, WhichJobs};
pub use error::{ClientError, DecodeError, EncodeError, TransportError};
pub use message::MessageDecoder;
pub use transport::{HttpTransport, Transport, UnixTransport};

pub use ipp_types;
