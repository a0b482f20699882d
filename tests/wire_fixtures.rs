//! Fixed-scenario encode/decode tests: specific attribute shapes that have
//! tripped up other IPP implementations (a bare 15-byte job-id attribute, a
//! boolean printer attribute, a URI, and a nested `media-col` collection).

use std::io::Cursor;

use ipp_codec::message::{encode_request, encode_response, MessageDecoder};
use ipp_types::attribute::names;
use ipp_types::collection::Collection;
use ipp_types::group::AttributeGroup;
use ipp_types::message::{Request, Response, Version};
use ipp_types::tag::GroupTag;
use ipp_types::value::AttributeValue;
use ipp_types::Attribute;

#[test]
fn job_id_attribute_encodes_to_the_expected_byte_layout() {
    let mut group = AttributeGroup::new(GroupTag::JobAttributes);
    group.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(42)));
    let response = Response::new(Version::V2_0, 0x0000, 1, vec![group], Vec::new());

    let mut buf = Vec::new();
    encode_response(&mut buf, &response).unwrap();

    // header: version(2) + status-code(2) + request-id(4) = 8 bytes
    // job-attributes group: group-tag(1) +
    //   attribute entry: value-tag(1) + name-len(2) + "job-id"(6) + value-len(2) + i32(4) = 15
    // end-of-attributes-tag: 1 byte
    assert_eq!(buf.len(), 8 + 1 + 15 + 1);
    assert_eq!(buf[8], GroupTag::JobAttributes.as_u8());
    assert_eq!(buf[9], ipp_types::tag::ValueTag::Integer.as_u8());
    assert_eq!(&buf[10..12], &6u16.to_be_bytes());
    assert_eq!(&buf[12..18], b"job-id");
    assert_eq!(&buf[18..20], &4u16.to_be_bytes());
    assert_eq!(&buf[20..24], &42i32.to_be_bytes());
    assert_eq!(buf[24], GroupTag::EndOfAttributes.as_u8());

    let (decoded, _) = MessageDecoder::new(Cursor::new(buf)).decode_response().unwrap();
    assert_eq!(
        decoded.job_attribute_groups().next().unwrap().get(names::JOB_ID).unwrap().value(),
        Some(&AttributeValue::Integer(42))
    );
}

#[test]
fn printer_is_shared_round_trips_as_boolean() {
    let mut printer = AttributeGroup::new(GroupTag::PrinterAttributes);
    printer.push(Attribute::new(names::PRINTER_IS_SHARED, AttributeValue::Boolean(false)));
    let response = Response::new(Version::V2_0, 0x0000, 1, vec![printer], Vec::new());

    let mut buf = Vec::new();
    encode_response(&mut buf, &response).unwrap();
    let (decoded, _) = MessageDecoder::new(Cursor::new(buf)).decode_response().unwrap();

    let group = decoded.printer_attribute_groups().next().unwrap();
    assert_eq!(group.get(names::PRINTER_IS_SHARED).unwrap().value(), Some(&AttributeValue::Boolean(false)));
}

#[test]
fn printer_uri_round_trips_exactly() {
    let mut request = Request::new(0x000b, 1);
    request
        .operation_attributes_mut()
        .push(Attribute::new(names::PRINTER_URI, AttributeValue::uri("ipp://printserver.example.com:631/printers/color")));

    let mut buf = Vec::new();
    encode_request(&mut buf, &request).unwrap();
    let (decoded, _) = MessageDecoder::new(Cursor::new(buf)).decode_request().unwrap();

    let ops = decoded.group(GroupTag::OperationAttributes).unwrap();
    assert_eq!(
        ops.get(names::PRINTER_URI).unwrap().value(),
        Some(&AttributeValue::uri("ipp://printserver.example.com:631/printers/color"))
    );
}

#[test]
fn media_col_nested_collection_round_trips() {
    let media_size = Collection::new()
        .with_member("x-dimension", AttributeValue::Integer(21590))
        .with_member("y-dimension", AttributeValue::Integer(27940));
    let media_col = Collection::new()
        .with_member("media-size-name", AttributeValue::keyword("na_letter_8.5x11in"))
        .with_member("media-size", AttributeValue::Collection(media_size));

    let mut request = Request::new(0x0002, 1);
    request
        .operation_attributes_mut()
        .push(Attribute::new("media-col", AttributeValue::Collection(media_col.clone())));

    let mut buf = Vec::new();
    encode_request(&mut buf, &request).unwrap();
    let (decoded, _) = MessageDecoder::new(Cursor::new(buf)).decode_request().unwrap();

    let ops = decoded.group(GroupTag::OperationAttributes).unwrap();
    let decoded_value = ops.get("media-col").unwrap().value().unwrap();
    match decoded_value {
        AttributeValue::Collection(collection) => assert_eq!(collection, &media_col),
        other => panic!("expected a collection, got {other:?}"),
    }
}
