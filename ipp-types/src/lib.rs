#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

//! Misuse-resistant data structures for the Internet Printing Protocol.
//!
//! This crate has no knowledge of the wire format or of any I/O — it only
//! models the values a conforming IPP message can carry. Encoding, decoding
//! and transport live in `ipp-codec`, one layer up.

pub mod attribute;
pub mod collection;
pub mod document;
pub mod error;
pub mod group;
pub mod message;
pub mod operation;
pub mod status;
pub mod tag;
pub mod value;

pub use attribute::Attribute;
pub use collection::Collection;
pub use document::Document;
pub use group::AttributeGroup;
pub use message::{Request, Response, Version};
pub use operation::Operation;
pub use status::StatusCode;
pub use tag::{GroupTag, ValueTag};
pub use value::AttributeValue;
