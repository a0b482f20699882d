//! The request/response envelope codec: protocol version, operation or
//! status code, request-id, the sequence of attribute groups, and the
//! `end-of-attributes-tag` that hands off to document data.
//!
//! Decoding is driven by an explicit state machine rather than recursive
//! descent, because the only way to know whether the next byte starts a new
//! attribute group or another attribute in the current group is to look at
//! it: anything below `0x10` is a group delimiter, everything else is a
//! value tag (RFC 8010 §3.5.1).

use std::io::{Read, Write};

use ipp_types::attribute::Attribute;
use ipp_types::group::AttributeGroup;
use ipp_types::message::{Request, Response, Version};
use ipp_types::tag::{GroupTag, ValueTag};

use crate::attribute::{decode_value, encode_entry, read_counted_string, read_tag_byte};
use crate::error::{DecodeError, EncodeError};

fn read_version(reader: &mut impl Read) -> Result<Version, DecodeError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(Version {
        major: buf[0],
        minor: buf[1],
    })
}

fn write_version(writer: &mut impl Write, version: Version) -> Result<(), EncodeError> {
    writer.write_all(&[version.major, version.minor])
        .map_err(EncodeError::from)
}

fn read_i16(reader: &mut impl Read) -> Result<i16, DecodeError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

fn read_i32(reader: &mut impl Read) -> Result<i32, DecodeError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// States of the explicit group/attribute decoding state machine.
///
/// `AttributeGroup` is entered once per group delimiter byte already
/// consumed; `Attribute` is entered once per value inside that group, and
/// loops until a byte below `0x10` signals the next delimiter.
#[derive(Debug)]
enum DecoderState {
    Initial,
    AttributeGroup { tag_byte: u8 },
    Attribute { tag_byte: u8 },
    Done,
}

/// Drives the byte-by-byte decoding of one IPP message envelope.
///
/// One instance decodes exactly one message; it is not reusable across
/// messages (mirroring that a fresh decoder is constructed per request or
/// response read off the transport).
pub struct MessageDecoder<R> {
    reader: R,
    state: DecoderState,
    groups: Vec<AttributeGroup>,
    current: Option<AttributeGroup>,
    current_attribute_name: Option<String>,
}

/// The envelope fields common to requests and responses, read before any
/// attribute group.
struct Header {
    version: Version,
    second_field: i16,
    request_id: i32,
}

impl<R> std::fmt::Debug for MessageDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDecoder").field("state", &self.state).finish_non_exhaustive()
    }
}

impl<R: Read> MessageDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: DecoderState::Initial,
            groups: Vec::new(),
            current: None,
            current_attribute_name: None,
        }
    }

    fn read_header(&mut self) -> Result<Header, DecodeError> {
        let version = read_version(&mut self.reader)?;
        let second_field = read_i16(&mut self.reader)?;
        let request_id = read_i32(&mut self.reader)?;
        Ok(Header {
            version,
            second_field,
            request_id,
        })
    }

    fn close_current_group(&mut self) {
        if let Some(group) = self.current.take() {
            self.groups.push(group);
        }
    }

    /// Run the state machine until `end-of-attributes-tag`, then return the
    /// header fields and completed groups. The caller (request- or
    /// response-specific `decode` function) owns the reader afterward to
    /// read any trailing document/data bytes.
    fn run(&mut self) -> Result<Header, DecodeError> {
        let header = self.read_header()?;
        let first_tag = read_tag_byte(&mut self.reader)?;
        self.state = DecoderState::AttributeGroup { tag_byte: first_tag };

        loop {
            match self.state {
                DecoderState::Initial => unreachable!("header already consumed"),
                DecoderState::AttributeGroup { tag_byte } => {
                    self.close_current_group();

                    if tag_byte == GroupTag::EndOfAttributes.as_u8() {
                        self.state = DecoderState::Done;
                        continue;
                    }

                    let group_tag = GroupTag::try_from(tag_byte)?;
                    self.current = Some(AttributeGroup::new(group_tag));
                    self.current_attribute_name = None;

                    let next_tag_byte = read_tag_byte(&mut self.reader)?;
                    self.state = DecoderState::Attribute {
                        tag_byte: next_tag_byte,
                    };
                }
                DecoderState::Attribute { tag_byte } => {
                    if tag_byte < 0x10 {
                        self.state = DecoderState::AttributeGroup { tag_byte };
                        continue;
                    }

                    let value_tag = ValueTag::try_from(tag_byte)?;
                    let name = read_counted_string(&mut self.reader)?;
                    let value = decode_value(&mut self.reader, value_tag)?;

                    let group = self
                        .current
                        .as_mut()
                        .expect("attribute state always follows an open group");

                    if name.is_empty() {
                        // "Additional value" entry: append to the attribute
                        // most recently named in this group.
                        let attr_name = self.current_attribute_name.clone().ok_or(
                            DecodeError::UnexpectedTag {
                                tag: value_tag,
                                context: "additional value with no preceding attribute",
                            },
                        )?;
                        if let Some(existing) =
                            group.attributes_mut().iter_mut().find(|a| a.name() == attr_name)
                        {
                            existing.push_value(value);
                        } else {
                            group.push(Attribute::new(attr_name, value));
                        }
                    } else {
                        self.current_attribute_name = Some(name.clone());
                        group.push(Attribute::new(name, value));
                    }

                    let next_tag_byte = read_tag_byte(&mut self.reader)?;
                    self.state = DecoderState::Attribute {
                        tag_byte: next_tag_byte,
                    };
                }
                DecoderState::Done => return Ok(header),
            }
        }
    }

    /// Decode the message as a request, leaving the reader positioned right
    /// after `end-of-attributes-tag` so the caller can stream any document
    /// body that follows.
    pub fn decode_request(mut self) -> Result<(Request, R), DecodeError> {
        let header = self.run()?;
        let mut request = Request::new(header.second_field, header.request_id);
        request.version = header.version;
        // `Request::new` seeds a default operation-attributes group;
        // replace it wholesale with what was actually decoded.
        for group in self.groups {
            if group.tag() == GroupTag::OperationAttributes {
                *request.operation_attributes_mut() = group;
            } else {
                request.push_group(group);
            }
        }
        Ok((request, self.reader))
    }

    /// Decode the message as a response. The reader's remainder after
    /// `end-of-attributes-tag` is the response's optional opaque trailing
    /// data (spec §4.C) and is buffered into [`Response::data`]: IPP
    /// responses, unlike request document bodies, are small enough that
    /// streaming isn't worth the complexity.
    pub fn decode_response(mut self) -> Result<(Response, R), DecodeError> {
        let header = self.run()?;
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        let response = Response::new(header.version, header.second_field, header.request_id, self.groups, data);
        Ok((response, self.reader))
    }
}

/// Encode a request's envelope and attribute groups, up to and including
/// `end-of-attributes-tag`. Document data, if any, is written separately by
/// the transport layer so it can be streamed without buffering.
pub fn encode_request(writer: &mut impl Write, request: &Request) -> Result<(), EncodeError> {
    write_version(writer, request.version)?;
    writer.write_all(&request.operation_id.to_be_bytes())?;
    writer.write_all(&request.request_id.to_be_bytes())?;
    encode_groups(writer, request.groups())?;
    writer.write_all(&[GroupTag::EndOfAttributes.as_u8()])?;
    Ok(())
}

/// Encode a response's envelope and attribute groups. Primarily used by
/// tests and by any server-facing counterpart that reuses this codec.
pub fn encode_response(writer: &mut impl Write, response: &Response) -> Result<(), EncodeError> {
    write_version(writer, response.version)?;
    writer.write_all(&response.status_code.to_be_bytes())?;
    writer.write_all(&response.request_id.to_be_bytes())?;
    encode_groups(writer, response.groups())?;
    writer.write_all(&[GroupTag::EndOfAttributes.as_u8()])?;
    writer.write_all(response.data())?;
    Ok(())
}

fn encode_groups(writer: &mut impl Write, groups: &[AttributeGroup]) -> Result<(), EncodeError> {
    for group in groups {
        writer.write_all(&[group.tag().as_u8()])?;
        for attribute in group.attributes() {
            let mut values = attribute.values().iter();
            if let Some(first) = values.next() {
                encode_entry(writer, attribute.name(), attribute.name(), first)?;
            }
            for additional in values {
                encode_entry(writer, attribute.name(), "", additional)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipp_types::attribute::names;
    use ipp_types::group::AttributeGroup;
    use ipp_types::operation::Operation;
    use ipp_types::value::AttributeValue;
    use std::io::Cursor;

    #[test]
    fn request_roundtrips_through_encode_decode() {
        let mut request = Request::new(Operation::PrintJob.as_i16(), 7);
        request
            .operation_attributes_mut()
            .push(Attribute::new(names::PRINTER_URI, AttributeValue::uri("ipp://localhost/printers/x")));

        let mut buf = Vec::new();
        encode_request(&mut buf, &request).unwrap();

        let (decoded, _rest) = MessageDecoder::new(Cursor::new(buf)).decode_request().unwrap();
        assert_eq!(decoded.operation_id, Operation::PrintJob.as_i16());
        assert_eq!(decoded.request_id, 7);
        let ops = decoded.group(GroupTag::OperationAttributes).unwrap();
        assert_eq!(ops.get(names::PRINTER_URI).unwrap().value(), request
            .group(GroupTag::OperationAttributes)
            .unwrap()
            .get(names::PRINTER_URI)
            .unwrap()
            .value());
    }

    #[test]
    fn decoder_collects_additional_values_onto_prior_attribute() {
        let mut request = Request::new(Operation::GetJobAttributes.as_i16(), 1);
        request.operation_attributes_mut().push(Attribute::with_values(
            names::REQUESTED_ATTRIBUTES,
            vec![AttributeValue::keyword("job-id"), AttributeValue::keyword("job-state")],
        ));

        let mut buf = Vec::new();
        encode_request(&mut buf, &request).unwrap();
        let (decoded, _) = MessageDecoder::new(Cursor::new(buf)).decode_request().unwrap();
        let attr = decoded
            .group(GroupTag::OperationAttributes)
            .unwrap()
            .get(names::REQUESTED_ATTRIBUTES)
            .unwrap();
        assert_eq!(attr.values().len(), 2);
    }

    #[test]
    fn multiple_groups_are_kept_separate() {
        let mut request = Request::new(Operation::PrintJob.as_i16(), 1);
        let mut job_group = AttributeGroup::new(GroupTag::JobAttributes);
        job_group.push(Attribute::new("copies", AttributeValue::Integer(2)));
        request.push_group(job_group);

        let mut buf = Vec::new();
        encode_request(&mut buf, &request).unwrap();
        let (decoded, _) = MessageDecoder::new(Cursor::new(buf)).decode_request().unwrap();
        assert!(decoded.group(GroupTag::JobAttributes).is_some());
    }
}
