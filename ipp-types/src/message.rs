//! The request/response envelope: version, operation/status, request-id,
//! and the ordered list of attribute groups.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::{names, Attribute};
use crate::group::AttributeGroup;
use crate::tag::GroupTag;
use crate::value::AttributeValue;

/// The two-byte protocol version. CUPS and this crate target `2.0`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const V1_1: Version = Version { major: 1, minor: 1 };
    pub const V2_0: Version = Version { major: 2, minor: 0 };
}

impl Default for Version {
    fn default() -> Self {
        Self::V2_0
    }
}

/// A client-to-printer request: operation-id, request-id, and groups.
///
/// The first group, if present, is conventionally the operation-attributes
/// group and always carries `attributes-charset` and
/// `attributes-natural-language` as its first two entries (RFC 8010 §3.1.1).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub version: Version,
    pub operation_id: i16,
    pub request_id: i32,
    groups: Vec<AttributeGroup>,
}

impl Request {
    pub fn new(operation_id: i16, request_id: i32) -> Self {
        let mut operation_attrs = AttributeGroup::new(GroupTag::OperationAttributes);
        operation_attrs.push(Attribute::new(
            names::ATTRIBUTES_CHARSET,
            AttributeValue::Charset("utf-8".to_string()),
        ));
        operation_attrs.push(Attribute::new(
            names::ATTRIBUTES_NATURAL_LANGUAGE,
            AttributeValue::NaturalLanguage("en-US".to_string()),
        ));
        Self {
            version: Version::default(),
            operation_id,
            request_id,
            groups: vec![operation_attrs],
        }
    }

    pub fn groups(&self) -> &[AttributeGroup] {
        &self.groups
    }

    pub fn push_group(&mut self, group: AttributeGroup) {
        self.groups.push(group);
    }

    /// The operation-attributes group, created implicitly by [`Request::new`].
    pub fn operation_attributes_mut(&mut self) -> &mut AttributeGroup {
        if self.groups.is_empty() || self.groups[0].tag() != GroupTag::OperationAttributes {
            self.groups
                .insert(0, AttributeGroup::new(GroupTag::OperationAttributes));
        }
        &mut self.groups[0]
    }

    pub fn group(&self, tag: GroupTag) -> Option<&AttributeGroup> {
        self.groups.iter().find(|g| g.tag() == tag)
    }
}

/// A printer-to-client response: status-code, request-id (echoed from the
/// request), and groups.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub version: Version,
    pub status_code: i16,
    pub request_id: i32,
    groups: Vec<AttributeGroup>,
    data: Vec<u8>,
}

impl Response {
    pub fn new(
        version: Version,
        status_code: i16,
        request_id: i32,
        groups: Vec<AttributeGroup>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            version,
            status_code,
            request_id,
            groups,
            data,
        }
    }

    pub fn groups(&self) -> &[AttributeGroup] {
        &self.groups
    }

    /// The opaque bytes following `end-of-attributes-tag`, e.g. the binary
    /// payload CUPS appends to a `CUPS-Get-Document` response. Empty for
    /// the common case of a response carrying only attributes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn group(&self, tag: GroupTag) -> Option<&AttributeGroup> {
        self.groups.iter().find(|g| g.tag() == tag)
    }

    /// The `unsupported-attributes` group, if the printer rejected or
    /// ignored any requested attribute.
    pub fn unsupported_attributes(&self) -> Option<&AttributeGroup> {
        self.group(GroupTag::UnsupportedAttributes)
    }

    /// Every `printer-attributes` group (a `Get-Printers`-style response may
    /// carry more than one printer).
    pub fn printer_attribute_groups(&self) -> impl Iterator<Item = &AttributeGroup> {
        self.groups
            .iter()
            .filter(|g| g.tag() == GroupTag::PrinterAttributes)
    }

    /// Every `job-attributes` group.
    pub fn job_attribute_groups(&self) -> impl Iterator<Item = &AttributeGroup> {
        self.groups
            .iter()
            .filter(|g| g.tag() == GroupTag::JobAttributes)
    }

    pub fn is_success(&self) -> bool {
        (self.status_code as u16) <= 0x00ff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_seeds_charset_and_language() {
        let req = Request::new(0x0002, 1);
        let ops = req.group(GroupTag::OperationAttributes).unwrap();
        assert_eq!(ops.attributes()[0].name(), names::ATTRIBUTES_CHARSET);
        assert_eq!(ops.attributes()[1].name(), names::ATTRIBUTES_NATURAL_LANGUAGE);
    }

    #[test]
    fn response_success_class() {
        let resp = Response::new(Version::V2_0, 0x0000, 1, vec![], Vec::new());
        assert!(resp.is_success());
        let resp = Response::new(Version::V2_0, 0x0406, 1, vec![], Vec::new());
        assert!(!resp.is_success());
    }
}
