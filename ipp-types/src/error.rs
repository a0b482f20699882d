use thiserror::Error;

/// Errors raised while interpreting the leading tag byte of a TLV entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum TagError {
    #[error("byte {0:#04x} is not a known group delimiter tag")]
    UnknownGroup(u8),
    #[error("byte {0:#04x} is not a known value tag")]
    UnknownValue(u8),
    #[error("byte {0:#04x} is a group delimiter, not a value tag")]
    NotAValueTag(u8),
}

/// Errors raised while mapping an attribute name to its expected value tag.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("attribute \"{0}\" has no known tag mapping")]
pub struct UnknownAttributeError(pub String);
