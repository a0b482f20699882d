//! The decoded payload of a single IPP value, independent of its wire tag.

use crate::tag::ValueTag;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit of measure carried alongside a `resolution` value (RFC 8011 §5.1.16).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ResolutionUnit {
    DotsPerInch = 3,
    DotsPerCentimeter = 4,
}

impl ResolutionUnit {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            3 => Some(Self::DotsPerInch),
            4 => Some(Self::DotsPerCentimeter),
            _ => None,
        }
    }
}

/// A decoded `resolution` value: cross-feed and feed resolution plus unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub cross_feed: i32,
    pub feed: i32,
    pub unit: ResolutionUnit,
}

/// An inclusive `(min, max)` range, as carried by `rangeOfInteger` values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct IntegerRange {
    pub min: i32,
    pub max: i32,
}

/// A text or name string paired with an explicit natural-language tag
/// (`textWithLanguage` / `nameWithLanguage`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LocalizedString {
    pub language: String,
    pub value: String,
}

/// The decoded payload of one IPP value.
///
/// Every variant corresponds to one or more [`ValueTag`]s; [`AttributeValue::tag`]
/// recovers the tag a given value was (or would be) encoded with. Collections
/// are represented by [`crate::collection::Collection`] and constructed via
/// [`AttributeValue::Collection`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// One of the six out-of-band tags (`unsupported`, `unknown`, ...):
    /// the value carries no payload, only the tag itself.
    OutOfBand(ValueTag),
    Integer(i32),
    Boolean(bool),
    Enum(i32),
    OctetString(Vec<u8>),
    /// RFC 8010 §3.9: a 2-byte year, month, day, hour, minute, second,
    /// deci-second, direction and UTC-offset hour/minute, as a raw
    /// 11-octet `dateTime`.
    DateTime([u8; 11]),
    Resolution(Resolution),
    RangeOfInteger(IntegerRange),
    TextWithLanguage(LocalizedString),
    NameWithLanguage(LocalizedString),
    Text(String),
    Name(String),
    Keyword(String),
    Uri(String),
    UriScheme(String),
    Charset(String),
    NaturalLanguage(String),
    MimeMediaType(String),
    MemberName(String),
    /// A nested attribute collection (`begin-collection` ... `end-collection`).
    Collection(crate::collection::Collection),
}

impl AttributeValue {
    /// The wire tag this value is encoded with.
    pub fn tag(&self) -> ValueTag {
        match self {
            Self::OutOfBand(tag) => *tag,
            Self::Integer(_) => ValueTag::Integer,
            Self::Boolean(_) => ValueTag::Boolean,
            Self::Enum(_) => ValueTag::Enum,
            Self::OctetString(_) => ValueTag::OctetString,
            Self::DateTime(_) => ValueTag::DateTime,
            Self::Resolution(_) => ValueTag::Resolution,
            Self::RangeOfInteger(_) => ValueTag::RangeOfInteger,
            Self::TextWithLanguage(_) => ValueTag::TextWithLanguage,
            Self::NameWithLanguage(_) => ValueTag::NameWithLanguage,
            Self::Text(_) => ValueTag::Text,
            Self::Name(_) => ValueTag::Name,
            Self::Keyword(_) => ValueTag::Keyword,
            Self::Uri(_) => ValueTag::Uri,
            Self::UriScheme(_) => ValueTag::UriScheme,
            Self::Charset(_) => ValueTag::Charset,
            Self::NaturalLanguage(_) => ValueTag::NaturalLanguage,
            Self::MimeMediaType(_) => ValueTag::MimeMediaType,
            Self::MemberName(_) => ValueTag::MemberName,
            Self::Collection(_) => ValueTag::BeginCollection,
        }
    }

    /// Convenience constructor for a `keyword`-tagged string value.
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(value.into())
    }

    /// Convenience constructor for a `uri`-tagged string value.
    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri(value.into())
    }

    /// Convenience constructor for a `name`-tagged string value.
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
