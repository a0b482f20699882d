//! Named, tagged attributes and the static name-to-tag table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tag::ValueTag;
use crate::value::AttributeValue;

/// One `attribute-with-one-or-more-values` entry.
///
/// IPP allows multi-valued attributes (e.g. `requested-attributes`), encoded
/// on the wire as one full TLV entry followed by "additional value" entries
/// that repeat the tag but carry a zero-length name. [`Attribute::values`]
/// holds all of them in encounter order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    values: Vec<AttributeValue>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            values: vec![value],
        }
    }

    pub fn with_values(name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    /// The first value, the common case for single-valued attributes.
    pub fn value(&self) -> Option<&AttributeValue> {
        self.values.first()
    }

    pub fn push_value(&mut self, value: AttributeValue) {
        self.values.push(value);
    }

    pub fn is_multi_valued(&self) -> bool {
        self.values.len() > 1
    }
}

/// Well-known attribute name constants, used both as request-builder inputs
/// and as keys into [`tag_for_attribute`].
pub mod names {
    pub const ATTRIBUTES_CHARSET: &str = "attributes-charset";
    pub const ATTRIBUTES_NATURAL_LANGUAGE: &str = "attributes-natural-language";
    pub const COPIES: &str = "copies";
    pub const DEVICE_URI: &str = "device-uri";
    pub const DOCUMENT_FORMAT: &str = "document-format";
    pub const DOCUMENT_NAME: &str = "document-name";
    pub const DOCUMENT_NUMBER: &str = "document-number";
    pub const DOCUMENT_STATE: &str = "document-state";
    pub const FINISHINGS: &str = "finishings";
    pub const FIRST_JOB_ID: &str = "first-job-id";
    pub const HOLD_JOB_UNTIL: &str = "hold-job-until";
    pub const JOB_HOLD_UNTIL: &str = "job-hold-until";
    pub const JOB_ID: &str = "job-id";
    pub const JOB_NAME: &str = "job-name";
    pub const JOB_PRINTER_URI: &str = "job-printer-uri";
    pub const JOB_PRIORITY: &str = "job-priority";
    pub const JOB_SHEETS: &str = "job-sheets";
    pub const JOB_STATE: &str = "job-state";
    pub const JOB_STATE_REASON: &str = "job-state-reason";
    pub const JOB_URI: &str = "job-uri";
    pub const LAST_DOCUMENT: &str = "last-document";
    pub const LIMIT: &str = "limit";
    pub const MEDIA: &str = "media";
    pub const MEDIA_COL: &str = "media-col";
    pub const MEMBER_URIS: &str = "member-uris";
    pub const MY_JOBS: &str = "my-jobs";
    pub const NUMBER_UP: &str = "number-up";
    pub const ORIENTATION_REQUESTED: &str = "orientation-requested";
    pub const PPD_NAME: &str = "ppd-name";
    pub const PRINT_QUALITY: &str = "print-quality";
    pub const PRINTER_ERROR_POLICY: &str = "printer-error-policy";
    pub const PRINTER_INFO: &str = "printer-info";
    pub const PRINTER_IS_SHARED: &str = "printer-is-shared";
    pub const PRINTER_LOCATION: &str = "printer-location";
    pub const PRINTER_RESOLUTION: &str = "printer-resolution";
    pub const PRINTER_STATE: &str = "printer-state";
    pub const PRINTER_STATE_REASON: &str = "printer-state-reason";
    pub const PRINTER_URI: &str = "printer-uri";
    pub const PURGE_JOBS: &str = "purge-jobs";
    pub const REQUESTED_ATTRIBUTES: &str = "requested-attributes";
    pub const REQUESTING_USER_NAME: &str = "requesting-user-name";
    pub const STATUS_MESSAGE: &str = "status-message";
    pub const WHICH_JOBS: &str = "which-jobs";
}

/// Look up the wire tag a well-known attribute name is expected to carry.
///
/// This is the fixed name-to-tag table that servers and clients both rely
/// on for attributes whose tag can't be inferred from context alone, and it
/// is total over the names this crate emits: the encoder calls it for
/// every attribute it writes, so a name missing from this table is an
/// `UnknownAttribute` encode error, not a silent pass-through.
pub fn tag_for_attribute(name: &str) -> Option<ValueTag> {
    use names::*;
    Some(match name {
        ATTRIBUTES_CHARSET => ValueTag::Charset,
        ATTRIBUTES_NATURAL_LANGUAGE => ValueTag::NaturalLanguage,
        COPIES => ValueTag::Integer,
        DEVICE_URI => ValueTag::Uri,
        DOCUMENT_FORMAT => ValueTag::MimeMediaType,
        DOCUMENT_NAME => ValueTag::Name,
        DOCUMENT_NUMBER => ValueTag::Integer,
        DOCUMENT_STATE => ValueTag::Enum,
        FINISHINGS => ValueTag::Enum,
        HOLD_JOB_UNTIL => ValueTag::Keyword,
        JOB_HOLD_UNTIL => ValueTag::Keyword,
        JOB_ID => ValueTag::Integer,
        JOB_NAME => ValueTag::Name,
        JOB_PRINTER_URI => ValueTag::Uri,
        JOB_PRIORITY => ValueTag::Integer,
        JOB_SHEETS => ValueTag::Name,
        JOB_STATE => ValueTag::Enum,
        JOB_STATE_REASON => ValueTag::Keyword,
        JOB_URI => ValueTag::Uri,
        LAST_DOCUMENT => ValueTag::Boolean,
        LIMIT => ValueTag::Integer,
        MEDIA => ValueTag::Keyword,
        MEDIA_COL => ValueTag::BeginCollection,
        MEMBER_URIS => ValueTag::Uri,
        MY_JOBS => ValueTag::Boolean,
        NUMBER_UP => ValueTag::Integer,
        ORIENTATION_REQUESTED => ValueTag::Enum,
        PPD_NAME => ValueTag::Name,
        PRINT_QUALITY => ValueTag::Enum,
        PRINTER_ERROR_POLICY => ValueTag::Name,
        PRINTER_INFO => ValueTag::Text,
        PRINTER_IS_SHARED => ValueTag::Boolean,
        PRINTER_LOCATION => ValueTag::Text,
        PRINTER_RESOLUTION => ValueTag::Resolution,
        PRINTER_STATE => ValueTag::Enum,
        PRINTER_STATE_REASON => ValueTag::Keyword,
        PRINTER_URI => ValueTag::Uri,
        PURGE_JOBS => ValueTag::Boolean,
        REQUESTED_ATTRIBUTES => ValueTag::Keyword,
        REQUESTING_USER_NAME => ValueTag::Name,
        STATUS_MESSAGE => ValueTag::Text,
        WHICH_JOBS => ValueTag::Keyword,
        FIRST_JOB_ID => ValueTag::Integer,
        _ => return None,
    })
}

/// The attribute names CUPS sends by default for `Get-Printer-Attributes`
/// when the caller doesn't restrict `requested-attributes`.
pub const DEFAULT_PRINTER_ATTRIBUTES: &[&str] = &[
    "printer-name",
    "printer-type",
    "printer-location",
    "printer-info",
    "printer-make-and-model",
    "printer-state",
    "printer-state-message",
    "printer-state-reason",
    "printer-uri-supported",
    "device-uri",
    "printer-is-shared",
];

/// The attribute names CUPS sends by default for job-attribute queries.
pub const DEFAULT_JOB_ATTRIBUTES: &[&str] = &[
    "job-id",
    "job-name",
    "printer-uri",
    "job-state",
    "job-state-reasons",
    "job-hold-until",
    "job-media-progress",
    "job-k-octets",
    "number-of-documents",
    "copies",
    "job-originating-user-name",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_for_attribute_matches_known_names() {
        assert_eq!(tag_for_attribute("job-id"), Some(ValueTag::Integer));
        assert_eq!(tag_for_attribute("printer-uri"), Some(ValueTag::Uri));
        assert_eq!(
            tag_for_attribute("printer-is-shared"),
            Some(ValueTag::Boolean)
        );
        assert_eq!(tag_for_attribute("printer-resolution"), Some(ValueTag::Resolution));
    }

    #[test]
    fn tag_for_attribute_unknown_name_returns_none() {
        assert_eq!(tag_for_attribute("x-vendor-extension"), None);
    }

    #[test]
    fn attribute_collects_additional_values() {
        let mut attr = Attribute::new("requested-attributes", AttributeValue::keyword("job-id"));
        attr.push_value(AttributeValue::keyword("job-state"));
        assert!(attr.is_multi_valued());
        assert_eq!(attr.values().len(), 2);
    }
}
