//! Encoding and decoding of single attribute values.
//!
//! Everything here operates below the group/message level: given a tag and
//! a [`Read`]/[`Write`] cursor already positioned at a value, read or write
//! exactly that value's bytes. The group-and-message state machine in
//! [`crate::message`] is what decides which tag comes next.

use std::io::{Read, Write};

use ipp_types::attribute::tag_for_attribute;
use ipp_types::collection::Collection;
use ipp_types::error::UnknownAttributeError;
use ipp_types::tag::ValueTag;
use ipp_types::value::{AttributeValue, IntegerRange, LocalizedString, Resolution, ResolutionUnit};
use nom::number::complete::{be_i32, be_u8};
use nom::IResult;

use crate::error::{DecodeError, EncodeError};

/// Read a wire length field. RFC 8010 specifies lengths as signed 16-bit
/// integers; a negative value is rejected outright rather than reinterpreted
/// as a large unsigned length via a silent cast.
pub(crate) fn read_u16(reader: &mut impl Read) -> Result<u16, DecodeError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    let value = i16::from_be_bytes(buf);
    if value < 0 {
        return Err(DecodeError::NegativeLength(value));
    }
    Ok(value as u16)
}

fn write_u16(writer: &mut impl Write, value: u16) -> Result<(), EncodeError> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub(crate) fn read_tag_byte(reader: &mut impl Read) -> Result<u8, DecodeError> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a length-prefixed string: a u16 byte length followed by that many
/// UTF-8 bytes. Used for both attribute names and most value payloads.
pub(crate) fn read_counted_string(reader: &mut impl Read) -> Result<String, DecodeError> {
    let len = read_u16(reader)? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_counted_string(writer: &mut impl Write, name: &str, s: &str) -> Result<(), EncodeError> {
    if s.len() > u16::MAX as usize {
        return Err(EncodeError::ValueTooLong(name.to_string()));
    }
    write_u16(writer, s.len() as u16)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

fn read_counted_bytes(reader: &mut impl Read) -> Result<Vec<u8>, DecodeError> {
    let len = read_u16(reader)? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn leaf_i32(input: &[u8]) -> IResult<&[u8], i32> {
    be_i32(input)
}

fn leaf_bool(input: &[u8]) -> IResult<&[u8], bool> {
    let (rest, byte) = be_u8(input)?;
    Ok((rest, byte != 0))
}

fn map_nom_int(buf: &[u8], context: &'static str) -> Result<i32, DecodeError> {
    leaf_i32(buf)
        .map(|(_, v)| v)
        .map_err(|_| DecodeError::Integer(context))
}

/// Decode the value half of a TLV entry, given its already-classified tag.
///
/// `tag` must not be a group delimiter; callers dispatch on the lookahead
/// byte before calling this.
pub(crate) fn decode_value(reader: &mut impl Read, tag: ValueTag) -> Result<AttributeValue, DecodeError> {
    if tag.is_out_of_band() {
        // Out-of-band tags still carry a (normally zero) value-length field.
        let _ = read_u16(reader)?;
        return Ok(AttributeValue::OutOfBand(tag));
    }

    match tag {
        ValueTag::Integer | ValueTag::Enum => {
            let len = read_u16(reader)?;
            let mut buf = [0u8; 4];
            reader.read_exact(&mut buf)?;
            let value = map_nom_int(&buf, "integer")?;
            debug_assert_eq!(len, 4);
            if tag == ValueTag::Enum {
                Ok(AttributeValue::Enum(value))
            } else {
                Ok(AttributeValue::Integer(value))
            }
        }
        ValueTag::Boolean => {
            let _len = read_u16(reader)?;
            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            let (_, value) = leaf_bool(&buf).map_err(|_| DecodeError::Integer("boolean"))?;
            Ok(AttributeValue::Boolean(value))
        }
        ValueTag::OctetString => Ok(AttributeValue::OctetString(read_counted_bytes(reader)?)),
        ValueTag::DateTime => {
            let len = read_u16(reader)? as usize;
            if len != 11 {
                return Err(DecodeError::ValueTooLarge(len as u32));
            }
            let mut buf = [0u8; 11];
            reader.read_exact(&mut buf)?;
            Ok(AttributeValue::DateTime(buf))
        }
        ValueTag::Resolution => {
            let _len = read_u16(reader)?;
            let mut buf = [0u8; 9];
            reader.read_exact(&mut buf)?;
            let cross_feed = map_nom_int(&buf[0..4], "resolution.cross_feed")?;
            let feed = map_nom_int(&buf[4..8], "resolution.feed")?;
            let unit = ResolutionUnit::from_u8(buf[8])
                .ok_or(DecodeError::Integer("resolution.unit"))?;
            Ok(AttributeValue::Resolution(Resolution {
                cross_feed,
                feed,
                unit,
            }))
        }
        ValueTag::RangeOfInteger => {
            let _len = read_u16(reader)?;
            let mut buf = [0u8; 8];
            reader.read_exact(&mut buf)?;
            let min = map_nom_int(&buf[0..4], "range.min")?;
            let max = map_nom_int(&buf[4..8], "range.max")?;
            Ok(AttributeValue::RangeOfInteger(IntegerRange { min, max }))
        }
        ValueTag::TextWithLanguage | ValueTag::NameWithLanguage => {
            let _outer_len = read_u16(reader)?;
            let language = read_counted_string(reader)?;
            let value = read_counted_string(reader)?;
            let localized = LocalizedString { language, value };
            Ok(if tag == ValueTag::TextWithLanguage {
                AttributeValue::TextWithLanguage(localized)
            } else {
                AttributeValue::NameWithLanguage(localized)
            })
        }
        ValueTag::Text => Ok(AttributeValue::Text(read_counted_string(reader)?)),
        ValueTag::Name => Ok(AttributeValue::Name(read_counted_string(reader)?)),
        ValueTag::ReservedString => Ok(AttributeValue::OctetString(read_counted_bytes(reader)?)),
        ValueTag::Keyword => Ok(AttributeValue::Keyword(read_counted_string(reader)?)),
        ValueTag::Uri => Ok(AttributeValue::Uri(read_counted_string(reader)?)),
        ValueTag::UriScheme => Ok(AttributeValue::UriScheme(read_counted_string(reader)?)),
        ValueTag::Charset => Ok(AttributeValue::Charset(read_counted_string(reader)?)),
        ValueTag::NaturalLanguage => {
            Ok(AttributeValue::NaturalLanguage(read_counted_string(reader)?))
        }
        ValueTag::MimeMediaType => Ok(AttributeValue::MimeMediaType(read_counted_string(reader)?)),
        ValueTag::MemberName => Ok(AttributeValue::MemberName(read_counted_string(reader)?)),
        ValueTag::BeginCollection => {
            let _len = read_u16(reader)?;
            Ok(AttributeValue::Collection(decode_collection(reader)?))
        }
        ValueTag::EndCollection => {
            let _len = read_u16(reader)?;
            Err(DecodeError::UnexpectedTag {
                tag,
                context: "value",
            })
        }
        ValueTag::Extension => Ok(AttributeValue::OctetString(read_counted_bytes(reader)?)),
        _ => unreachable!("out-of-band tags handled above"),
    }
}

/// Read collection members until the matching `end-collection` marker
/// (RFC 3382 §7.1): each member is a `memberAttrName` entry (zero-length
/// name, value is the member's name) immediately followed by the member's
/// actual tagged value (also zero-length name).
fn decode_collection(reader: &mut impl Read) -> Result<Collection, DecodeError> {
    let mut collection = Collection::new();
    loop {
        let tag_byte = read_tag_byte(reader)?;
        if tag_byte < 0x10 {
            return Err(DecodeError::UnexpectedTag {
                tag: ValueTag::BeginCollection,
                context: "collection member",
            });
        }
        let tag = ValueTag::try_from(tag_byte)?;

        if tag == ValueTag::EndCollection {
            let _name_len = read_u16(reader)?;
            let _value_len = read_u16(reader)?;
            return Ok(collection);
        }

        if tag != ValueTag::MemberName {
            return Err(DecodeError::UnexpectedTag {
                tag,
                context: "collection member name",
            });
        }
        let name_len = read_u16(reader)?;
        if name_len != 0 {
            return Err(DecodeError::UnexpectedTag {
                tag,
                context: "memberAttrName must have a zero-length name",
            });
        }
        let member_name = read_counted_string(reader)?;

        let value_tag_byte = read_tag_byte(reader)?;
        let value_tag = ValueTag::try_from(value_tag_byte)?;
        let member_name_len = read_u16(reader)?;
        if member_name_len != 0 {
            return Err(DecodeError::UnexpectedTag {
                tag: value_tag,
                context: "collection member value must have a zero-length name",
            });
        }
        let value = decode_value(reader, value_tag)?;
        collection.push(member_name, value);
    }
}

/// Broad category a [`ValueTag`] belongs to for the purpose of checking a
/// value's concrete tag against an attribute's declared tag: exact equality
/// is stricter than the protocol needs (an `Enum` value is a legal stand-in
/// wherever `Integer` is declared, and vice versa, and similarly for the
/// family of textual tags).
#[derive(Clone, Copy, Eq, PartialEq)]
enum TagCategory {
    Integer,
    Boolean,
    Text,
    Collection,
    Exact(ValueTag),
}

fn tag_category(tag: ValueTag) -> TagCategory {
    use ValueTag::*;
    match tag {
        Integer | Enum => TagCategory::Integer,
        Boolean => TagCategory::Boolean,
        Text | Name | Keyword | Uri | UriScheme | Charset | NaturalLanguage | MimeMediaType
        | TextWithLanguage | NameWithLanguage | MemberName => TagCategory::Text,
        BeginCollection => TagCategory::Collection,
        other => TagCategory::Exact(other),
    }
}

/// Look up `name`'s declared tag and check `value`'s concrete tag is
/// compatible with it, per the attribute-to-tag mapping in
/// [`ipp_types::attribute::tag_for_attribute`].
///
/// Out-of-band values (`unsupported`, `unknown`, `no-value`, ...) are exempt:
/// RFC 8010 permits them in place of any attribute's normal value, regardless
/// of what that attribute is otherwise declared to carry.
fn validate_tag(name: &str, value: &AttributeValue) -> Result<(), EncodeError> {
    if matches!(value, AttributeValue::OutOfBand(_)) {
        return Ok(());
    }
    let expected = tag_for_attribute(name).ok_or_else(|| UnknownAttributeError(name.to_string()))?;
    let found = value.tag();
    if tag_category(expected) == tag_category(found) {
        Ok(())
    } else {
        Err(EncodeError::TagTypeMismatch {
            name: name.to_string(),
            expected,
            found,
        })
    }
}

/// Write one full TLV entry: tag byte, name, and value.
///
/// `attribute_name` is the attribute this value belongs to and is what gets
/// validated against the tag table; `wire_name` is what's actually written
/// to the wire, which is empty for "additional value" entries continuing a
/// multi-valued attribute (RFC 8010 §3.5.2) even though those entries are
/// still validated under the attribute's real name.
pub(crate) fn encode_entry(
    writer: &mut impl Write,
    attribute_name: &str,
    wire_name: &str,
    value: &AttributeValue,
) -> Result<(), EncodeError> {
    validate_tag(attribute_name, value)?;
    writer.write_all(&[value.tag().as_u8()])?;
    write_counted_string(writer, wire_name, wire_name)?;
    encode_value(writer, wire_name, value)
}

fn encode_value(writer: &mut impl Write, name: &str, value: &AttributeValue) -> Result<(), EncodeError> {
    match value {
        AttributeValue::OutOfBand(_) => write_u16(writer, 0),
        AttributeValue::Integer(v) | AttributeValue::Enum(v) => {
            write_u16(writer, 4)?;
            writer.write_all(&v.to_be_bytes())?;
            Ok(())
        }
        AttributeValue::Boolean(v) => {
            write_u16(writer, 1)?;
            writer.write_all(&[*v as u8])?;
            Ok(())
        }
        AttributeValue::OctetString(bytes) => {
            if bytes.len() > u16::MAX as usize {
                return Err(EncodeError::ValueTooLong(name.to_string()));
            }
            write_u16(writer, bytes.len() as u16)?;
            writer.write_all(bytes)?;
            Ok(())
        }
        AttributeValue::DateTime(bytes) => {
            write_u16(writer, bytes.len() as u16)?;
            writer.write_all(bytes)?;
            Ok(())
        }
        AttributeValue::Resolution(res) => {
            write_u16(writer, 9)?;
            writer.write_all(&res.cross_feed.to_be_bytes())?;
            writer.write_all(&res.feed.to_be_bytes())?;
            writer.write_all(&[res.unit.as_u8()])?;
            Ok(())
        }
        AttributeValue::RangeOfInteger(range) => {
            write_u16(writer, 8)?;
            writer.write_all(&range.min.to_be_bytes())?;
            writer.write_all(&range.max.to_be_bytes())?;
            Ok(())
        }
        AttributeValue::TextWithLanguage(loc) | AttributeValue::NameWithLanguage(loc) => {
            let total = 2 + loc.language.len() + 2 + loc.value.len();
            if total > u16::MAX as usize {
                return Err(EncodeError::ValueTooLong(name.to_string()));
            }
            write_u16(writer, total as u16)?;
            write_counted_string(writer, name, &loc.language)?;
            write_counted_string(writer, name, &loc.value)?;
            Ok(())
        }
        AttributeValue::Text(s)
        | AttributeValue::Name(s)
        | AttributeValue::Keyword(s)
        | AttributeValue::Uri(s)
        | AttributeValue::UriScheme(s)
        | AttributeValue::Charset(s)
        | AttributeValue::NaturalLanguage(s)
        | AttributeValue::MimeMediaType(s)
        | AttributeValue::MemberName(s) => write_counted_string(writer, name, s),
        AttributeValue::Collection(collection) => {
            write_u16(writer, 0)?;
            encode_collection(writer, collection)
        }
    }
}

fn encode_collection(writer: &mut impl Write, collection: &Collection) -> Result<(), EncodeError> {
    for member in collection.members() {
        writer.write_all(&[ValueTag::MemberName.as_u8()])?;
        write_u16(writer, 0)?;
        write_counted_string(writer, &member.name, &member.name)?;

        writer.write_all(&[member.value.tag().as_u8()])?;
        write_u16(writer, 0)?;
        encode_value(writer, &member.name, &member.value)?;
    }
    writer.write_all(&[ValueTag::EndCollection.as_u8()])?;
    write_u16(writer, 0)?;
    write_u16(writer, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipp_types::attribute::names;
    use std::io::Cursor;

    fn roundtrip(name: &str, value: AttributeValue) -> AttributeValue {
        let mut buf = Vec::new();
        encode_entry(&mut buf, name, name, &value).unwrap();
        let mut cursor = Cursor::new(buf);
        let tag_byte = read_tag_byte(&mut cursor).unwrap();
        let tag = ValueTag::try_from(tag_byte).unwrap();
        let decoded_name = read_counted_string(&mut cursor).unwrap();
        assert_eq!(decoded_name, name);
        decode_value(&mut cursor, tag).unwrap()
    }

    #[test]
    fn integer_roundtrips() {
        assert_eq!(
            roundtrip(names::COPIES, AttributeValue::Integer(42)),
            AttributeValue::Integer(42)
        );
    }

    #[test]
    fn boolean_roundtrips() {
        assert_eq!(
            roundtrip(names::PRINTER_IS_SHARED, AttributeValue::Boolean(true)),
            AttributeValue::Boolean(true)
        );
        assert_eq!(
            roundtrip(names::PRINTER_IS_SHARED, AttributeValue::Boolean(false)),
            AttributeValue::Boolean(false)
        );
    }

    #[test]
    fn keyword_roundtrips() {
        assert_eq!(
            roundtrip(names::MEDIA, AttributeValue::keyword("one-sided")),
            AttributeValue::keyword("one-sided")
        );
    }

    #[test]
    fn resolution_roundtrips() {
        let res = AttributeValue::Resolution(Resolution {
            cross_feed: 300,
            feed: 300,
            unit: ResolutionUnit::DotsPerInch,
        });
        assert_eq!(roundtrip(names::PRINTER_RESOLUTION, res.clone()), res);
    }

    #[test]
    fn nested_collection_roundtrips() {
        let mut inner = Collection::new();
        inner.push("media-size-name", AttributeValue::keyword("iso_a4_210x297mm"));
        let value = AttributeValue::Collection(inner);
        assert_eq!(roundtrip(names::MEDIA_COL, value.clone()), value);
    }

    #[test]
    fn out_of_band_roundtrips_even_under_an_unmapped_name() {
        assert_eq!(
            roundtrip("x-vendor-extension", AttributeValue::OutOfBand(ValueTag::Unsupported)),
            AttributeValue::OutOfBand(ValueTag::Unsupported)
        );
    }

    #[test]
    fn encoding_an_unknown_attribute_name_is_rejected() {
        let mut buf = Vec::new();
        let err = encode_entry(&mut buf, "x-vendor-extension", "x-vendor-extension", &AttributeValue::Integer(1))
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnknownAttribute(_)));
    }

    #[test]
    fn encoding_a_mismatched_tag_is_rejected() {
        let mut buf = Vec::new();
        let err = encode_entry(&mut buf, names::JOB_ID, names::JOB_ID, &AttributeValue::keyword("x")).unwrap_err();
        assert!(matches!(err, EncodeError::TagTypeMismatch { .. }));
    }
}
