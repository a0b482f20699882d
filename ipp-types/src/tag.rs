//! Group delimiters and value tags (IPP's single leading byte per TLV).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// A group-delimiter tag: any byte strictly less than `0x10`.
///
/// Per RFC 8010 §3.5.1, a delimiter both opens a new attribute group and
/// closes the previous one; `EndOfAttributes` closes the whole message.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum GroupTag {
    OperationAttributes = 0x01,
    JobAttributes = 0x02,
    EndOfAttributes = 0x03,
    PrinterAttributes = 0x04,
    UnsupportedAttributes = 0x05,
    SubscriptionAttributes = 0x06,
    EventNotificationAttributes = 0x07,
    ResourceAttributes = 0x08,
    DocumentAttributes = 0x09,
    SystemAttributes = 0x0a,
}

impl GroupTag {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for GroupTag {
    type Error = TagError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(Self::OperationAttributes),
            0x02 => Ok(Self::JobAttributes),
            0x03 => Ok(Self::EndOfAttributes),
            0x04 => Ok(Self::PrinterAttributes),
            0x05 => Ok(Self::UnsupportedAttributes),
            0x06 => Ok(Self::SubscriptionAttributes),
            0x07 => Ok(Self::EventNotificationAttributes),
            0x08 => Ok(Self::ResourceAttributes),
            0x09 => Ok(Self::DocumentAttributes),
            0x0a => Ok(Self::SystemAttributes),
            other => Err(TagError::UnknownGroup(other)),
        }
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OperationAttributes => "operation-attributes",
            Self::JobAttributes => "job-attributes",
            Self::EndOfAttributes => "end-of-attributes",
            Self::PrinterAttributes => "printer-attributes",
            Self::UnsupportedAttributes => "unsupported-attributes",
            Self::SubscriptionAttributes => "subscription-attributes",
            Self::EventNotificationAttributes => "event-notification-attributes",
            Self::ResourceAttributes => "resource-attributes",
            Self::DocumentAttributes => "document-attributes",
            Self::SystemAttributes => "system-attributes",
        };
        f.write_str(name)
    }
}

/// A value tag: any byte greater than or equal to `0x10`.
///
/// Out-of-band tags (`0x10..=0x17`) carry no payload — their "value" is the
/// tag itself (unsupported, default, unknown, ...). All other tags prefix an
/// actual value on the wire.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ValueTag {
    Unsupported = 0x10,
    Default = 0x11,
    Unknown = 0x12,
    NoValue = 0x13,
    NotSettable = 0x15,
    DeleteAttribute = 0x16,
    AdminDefine = 0x17,

    Integer = 0x21,
    Boolean = 0x22,
    Enum = 0x23,

    OctetString = 0x30,
    DateTime = 0x31,
    Resolution = 0x32,
    RangeOfInteger = 0x33,
    BeginCollection = 0x34,
    TextWithLanguage = 0x35,
    NameWithLanguage = 0x36,
    EndCollection = 0x37,

    Text = 0x41,
    Name = 0x42,
    ReservedString = 0x43,
    Keyword = 0x44,
    Uri = 0x45,
    UriScheme = 0x46,
    Charset = 0x47,
    NaturalLanguage = 0x48,
    MimeMediaType = 0x49,
    MemberName = 0x4a,

    Extension = 0x7f,
}

impl ValueTag {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this tag is one of the six out-of-band tags (0x10-0x17) whose
    /// value carries no payload bytes.
    pub const fn is_out_of_band(self) -> bool {
        matches!(
            self,
            Self::Unsupported
                | Self::Default
                | Self::Unknown
                | Self::NoValue
                | Self::NotSettable
                | Self::DeleteAttribute
                | Self::AdminDefine
        )
    }
}

impl TryFrom<u8> for ValueTag {
    type Error = TagError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x10 => Ok(Self::Unsupported),
            0x11 => Ok(Self::Default),
            0x12 => Ok(Self::Unknown),
            0x13 => Ok(Self::NoValue),
            0x15 => Ok(Self::NotSettable),
            0x16 => Ok(Self::DeleteAttribute),
            0x17 => Ok(Self::AdminDefine),
            0x21 => Ok(Self::Integer),
            0x22 => Ok(Self::Boolean),
            0x23 => Ok(Self::Enum),
            0x30 => Ok(Self::OctetString),
            0x31 => Ok(Self::DateTime),
            0x32 => Ok(Self::Resolution),
            0x33 => Ok(Self::RangeOfInteger),
            0x34 => Ok(Self::BeginCollection),
            0x35 => Ok(Self::TextWithLanguage),
            0x36 => Ok(Self::NameWithLanguage),
            0x37 => Ok(Self::EndCollection),
            0x41 => Ok(Self::Text),
            0x42 => Ok(Self::Name),
            0x43 => Ok(Self::ReservedString),
            0x44 => Ok(Self::Keyword),
            0x45 => Ok(Self::Uri),
            0x46 => Ok(Self::UriScheme),
            0x47 => Ok(Self::Charset),
            0x48 => Ok(Self::NaturalLanguage),
            0x49 => Ok(Self::MimeMediaType),
            0x4a => Ok(Self::MemberName),
            0x7f => Ok(Self::Extension),
            other if other < 0x10 => Err(TagError::NotAValueTag(other)),
            other => Err(TagError::UnknownValue(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_tag_round_trips() {
        for byte in [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a] {
            let tag = GroupTag::try_from(byte).unwrap();
            assert_eq!(tag.as_u8(), byte);
        }
    }

    #[test]
    fn group_tag_rejects_value_tags() {
        assert!(GroupTag::try_from(0x21).is_err());
    }

    #[test]
    fn value_tag_round_trips() {
        for byte in [0x21, 0x22, 0x23, 0x45, 0x34, 0x37, 0x7f] {
            let tag = ValueTag::try_from(byte).unwrap();
            assert_eq!(tag.as_u8(), byte);
        }
    }

    #[test]
    fn value_tag_rejects_group_tags() {
        assert!(matches!(
            ValueTag::try_from(0x03),
            Err(TagError::NotAValueTag(0x03))
        ));
    }

    #[test]
    fn out_of_band_tags_are_recognized() {
        assert!(ValueTag::Unsupported.is_out_of_band());
        assert!(ValueTag::AdminDefine.is_out_of_band());
        assert!(!ValueTag::Integer.is_out_of_band());
    }
}
