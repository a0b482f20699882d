//! Exercises the public data-model API as a downstream crate would use it,
//! independent of any wire encoding (that lives in `ipp-codec`).

use ipp_types::attribute::names;
use ipp_types::collection::{Collection, Member};
use ipp_types::group::AttributeGroup;
use ipp_types::message::{Request, Response, Version};
use ipp_types::status::StatusCode;
use ipp_types::tag::{GroupTag, ValueTag};
use ipp_types::value::{IntegerRange, Resolution, ResolutionUnit};
use ipp_types::{Attribute, AttributeValue};

#[test]
fn new_request_is_ready_to_carry_operation_attributes() {
    let mut request = Request::new(0x0002, 1);
    request
        .operation_attributes_mut()
        .push(Attribute::new(names::PRINTER_URI, AttributeValue::uri("ipp://localhost/printers/x")));

    let ops = request.group(GroupTag::OperationAttributes).unwrap();
    assert_eq!(ops.attributes().len(), 3);
    assert_eq!(ops.get(names::PRINTER_URI).unwrap().value(), Some(&AttributeValue::uri("ipp://localhost/printers/x")));
}

#[test]
fn multi_valued_attribute_preserves_order() {
    let attr = Attribute::with_values(
        names::REQUESTED_ATTRIBUTES,
        vec![
            AttributeValue::keyword("job-id"),
            AttributeValue::keyword("job-state"),
            AttributeValue::keyword("job-name"),
        ],
    );
    assert!(attr.is_multi_valued());
    assert_eq!(attr.values().len(), 3);
    assert_eq!(attr.value(), Some(&AttributeValue::keyword("job-id")));
}

#[test]
fn nested_collection_holds_members_in_encounter_order() {
    let media_col = Collection::new()
        .with_member("media-size-name", AttributeValue::keyword("na_letter_8.5x11in"))
        .with_member(
            "media-size",
            AttributeValue::Collection(
                Collection::new()
                    .with_member("x-dimension", AttributeValue::Integer(21590))
                    .with_member("y-dimension", AttributeValue::Integer(27940)),
            ),
        );

    assert_eq!(media_col.len(), 2);
    let nested = media_col.get("media-size").unwrap();
    match nested {
        AttributeValue::Collection(inner) => {
            assert_eq!(inner.len(), 2);
            assert_eq!(inner.get("x-dimension"), Some(&AttributeValue::Integer(21590)));
        }
        other => panic!("expected a nested collection, got {other:?}"),
    }
}

#[test]
fn collection_from_iterator_of_members() {
    let members = vec![
        Member {
            name: "copies".to_string(),
            value: AttributeValue::Integer(1),
        },
        Member {
            name: "sides".to_string(),
            value: AttributeValue::keyword("two-sided-long-edge"),
        },
    ];
    let collection: Collection = members.into_iter().collect();
    assert_eq!(collection.len(), 2);
    assert!(!collection.is_empty());
}

#[test]
fn resolution_and_range_values_carry_their_fields() {
    let resolution = AttributeValue::Resolution(Resolution {
        cross_feed: 300,
        feed: 300,
        unit: ResolutionUnit::DotsPerInch,
    });
    assert_eq!(resolution.tag(), ValueTag::Resolution);

    let range = AttributeValue::RangeOfInteger(IntegerRange { min: 1, max: 999 });
    assert_eq!(range.tag(), ValueTag::RangeOfInteger);
}

#[test]
fn response_groups_job_and_printer_attributes_separately() {
    let mut job = AttributeGroup::new(GroupTag::JobAttributes);
    job.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(15)));

    let mut printer = AttributeGroup::new(GroupTag::PrinterAttributes);
    printer.push(Attribute::new(names::PRINTER_IS_SHARED, AttributeValue::Boolean(true)));

    let response = Response::new(Version::V2_0, StatusCode::Ok.as_i16(), 1, vec![job, printer], Vec::new());

    assert_eq!(response.job_attribute_groups().count(), 1);
    assert_eq!(response.printer_attribute_groups().count(), 1);
    assert!(response.is_success());
}

#[test]
fn status_code_round_trips_through_raw_i16() {
    let status = StatusCode::from_i16(StatusCode::ErrorNotFound.as_i16()).unwrap();
    assert_eq!(status, StatusCode::ErrorNotFound);
    assert!(StatusCode::from_i16(0x7fff).is_none());
}
