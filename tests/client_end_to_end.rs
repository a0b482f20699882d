//! End-to-end exercises of the `Client` façade against a mock [`Transport`],
//! and fixed-byte scenarios mirroring captures from real printers.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use ipp_codec::message::{encode_response, MessageDecoder};
use ipp_codec::transport::CancelToken;
use ipp_codec::{Client, JobAttributes, Transport, TransportError};
use ipp_types::attribute::names;
use ipp_types::group::AttributeGroup;
use ipp_types::message::{Response, Version};
use ipp_types::tag::GroupTag;
use ipp_types::value::AttributeValue;
use ipp_types::{Attribute, Document};

/// A transport that records the last request it was asked to send and
/// replays a fixed response, standing in for a real printer in these tests.
struct MockTransport {
    response: Vec<u8>,
    last_request: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MockTransport {
    fn new(response: Vec<u8>) -> Self {
        Self {
            response,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn with_observer(response: Vec<u8>, last_request: Arc<Mutex<Option<Vec<u8>>>>) -> Self {
        Self { response, last_request }
    }
}

impl Transport for MockTransport {
    fn send(
        &mut self,
        request_bytes: &[u8],
        document: Option<&mut dyn std::io::Read>,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, TransportError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(TransportError::Canceled);
        }
        let mut recorded = request_bytes.to_vec();
        if let Some(doc) = document {
            doc.read_to_end(&mut recorded).unwrap();
        }
        *self.last_request.lock().unwrap() = Some(recorded);
        Ok(self.response.clone())
    }

    fn test_connection(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn build_url(&self, namespace: &str, object: Option<&dyn std::fmt::Display>) -> String {
        let mut path = String::new();
        if !namespace.is_empty() {
            path.push('/');
            path.push_str(namespace);
        }
        if let Some(object) = object {
            path.push('/');
            path.push_str(&object.to_string());
        }
        path
    }
}

/// Route the crate's `log` calls to stderr when a test is run with
/// `RUST_LOG` set, e.g. `RUST_LOG=debug cargo test -- --nocapture`.
fn init_logging() {
    let _ = env_logger::try_init();
}

fn success_response(request_id: i32, groups: Vec<AttributeGroup>) -> Vec<u8> {
    let response = Response::new(Version::V2_0, 0x0000, request_id, groups, Vec::new());
    let mut buf = Vec::new();
    encode_response(&mut buf, &response).unwrap();
    buf
}

#[test]
fn print_job_returns_assigned_job_id() {
    init_logging();
    let mut job_group = AttributeGroup::new(GroupTag::JobAttributes);
    job_group.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(42)));
    let response = success_response(1, vec![job_group]);

    let client = Client::with_transport("alice", Box::new(MockTransport::new(response)));

    let doc = Document::new(Cursor::new(b"hello world".to_vec()))
        .with_format("text/plain")
        .with_name("memo.txt");

    let job_id = client.print_job(doc, "office-printer", JobAttributes::new()).unwrap();
    assert_eq!(job_id, 42);
}

#[test]
fn print_job_populates_printer_uri_and_requesting_user() {
    init_logging();
    let mut job_group = AttributeGroup::new(GroupTag::JobAttributes);
    job_group.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(7)));
    let response = success_response(1, vec![job_group]);

    let last_request = Arc::new(Mutex::new(None));
    let transport = Box::new(MockTransport::with_observer(response, last_request.clone()));
    let client = Client::with_transport("alice", transport);

    let doc = Document::new(Cursor::new(b"%PDF-1.4".to_vec())).with_format("application/pdf");
    let job_id = client.print_job(doc, "office", JobAttributes::new()).unwrap();
    assert_eq!(job_id, 7);

    let sent = last_request.lock().unwrap().take().unwrap();
    let (request, _rest) = MessageDecoder::new(Cursor::new(sent)).decode_request().unwrap();
    let ops = request.group(GroupTag::OperationAttributes).unwrap();
    assert_eq!(
        ops.get(names::PRINTER_URI).unwrap().value(),
        Some(&AttributeValue::uri("ipp://localhost/printers/office"))
    );
    assert_eq!(
        ops.get(names::REQUESTING_USER_NAME).unwrap().value(),
        Some(&AttributeValue::name("alice"))
    );
}

#[test]
fn rejected_response_surfaces_unsupported_attribute_names() {
    init_logging();
    let mut ops = AttributeGroup::new(GroupTag::OperationAttributes);
    ops.push(Attribute::new(
        names::STATUS_MESSAGE,
        AttributeValue::Text("The printer or class does not exist.".to_string()),
    ));
    let mut unsupported = AttributeGroup::new(GroupTag::UnsupportedAttributes);
    unsupported.push(Attribute::new(names::MEDIA, AttributeValue::OutOfBand(ipp_types::tag::ValueTag::Unsupported)));
    let response = Response::new(Version::V2_0, 0x0406, 3, vec![ops, unsupported], Vec::new());
    let mut buf = Vec::new();
    encode_response(&mut buf, &response).unwrap();

    let client = Client::with_transport("bob", Box::new(MockTransport::new(buf)));
    let err = client.get_printer_attributes("missing-printer", None).unwrap_err();

    assert!(err.is_printer_not_found());
    match err {
        ipp_codec::ClientError::Rejected { status, unsupported, message, .. } => {
            assert_eq!(status, 0x0406);
            assert_eq!(unsupported, vec![names::MEDIA.to_string()]);
            assert_eq!(message, "The printer or class does not exist.");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn get_printer_attributes_returns_the_single_group() {
    init_logging();
    let mut printer_group = AttributeGroup::new(GroupTag::PrinterAttributes);
    printer_group.push(Attribute::new(names::PRINTER_IS_SHARED, AttributeValue::Boolean(true)));
    printer_group.push(Attribute::new(names::PRINTER_STATE, AttributeValue::Enum(3)));
    let response = success_response(9, vec![printer_group]);

    let client = Client::with_transport("alice", Box::new(MockTransport::new(response)));
    let group = client.get_printer_attributes("office-printer", None).unwrap();

    assert_eq!(group.tag(), GroupTag::PrinterAttributes);
    assert_eq!(
        group.get(names::PRINTER_IS_SHARED).unwrap().value(),
        Some(&AttributeValue::Boolean(true))
    );
}

#[test]
fn get_jobs_collects_every_job_attributes_group() {
    init_logging();
    let mut job1 = AttributeGroup::new(GroupTag::JobAttributes);
    job1.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(1)));
    let mut job2 = AttributeGroup::new(GroupTag::JobAttributes);
    job2.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(2)));
    let response = success_response(1, vec![job1, job2]);

    let client = Client::with_transport("alice", Box::new(MockTransport::new(response)));
    let jobs = client
        .get_jobs("office-printer", ipp_codec::WhichJobs::All, false, None, None, None)
        .unwrap();

    assert_eq!(jobs.len(), 2);
}

#[test]
fn cancel_job_succeeds_on_empty_response() {
    init_logging();
    let response = success_response(1, vec![]);
    let client = Client::with_transport("alice", Box::new(MockTransport::new(response)));
    client.cancel_job(5, false).unwrap();
}

/// A `Get-Printer-Attributes` response shaped like a real Samsung
/// M288x-series capture: three unsupported-attributes entries, followed by
/// a printer-attributes group with eight attributes.
#[test]
fn decodes_samsung_style_response_fixture() {
    init_logging();
    let mut unsupported = AttributeGroup::new(GroupTag::UnsupportedAttributes);
    unsupported.push(Attribute::new(
        "printer-privacy-policy-uri",
        AttributeValue::OutOfBand(ipp_types::tag::ValueTag::Unsupported),
    ));
    unsupported.push(Attribute::new(
        "printer-icc-profiles",
        AttributeValue::OutOfBand(ipp_types::tag::ValueTag::Unsupported),
    ));
    unsupported.push(Attribute::new(
        "printer-strings-uri",
        AttributeValue::OutOfBand(ipp_types::tag::ValueTag::Unsupported),
    ));

    let mut printer = AttributeGroup::new(GroupTag::PrinterAttributes);
    printer.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri("ipp://192.168.1.50/ipp/print")));
    printer.push(Attribute::new(names::PRINTER_INFO, AttributeValue::Text("Samsung M288x Series".to_string())));
    printer.push(Attribute::new(names::PRINTER_LOCATION, AttributeValue::Text("Office".to_string())));
    printer.push(Attribute::new(names::PRINTER_STATE, AttributeValue::Enum(3)));
    printer.push(Attribute::new(names::PRINTER_STATE_REASON, AttributeValue::keyword("none")));
    printer.push(Attribute::new(names::PRINTER_IS_SHARED, AttributeValue::Boolean(false)));
    printer.push(Attribute::new(
        names::PRINTER_RESOLUTION,
        AttributeValue::Resolution(ipp_types::value::Resolution {
            cross_feed: 600,
            feed: 600,
            unit: ipp_types::value::ResolutionUnit::DotsPerInch,
        }),
    ));
    printer.push(Attribute::new(names::DOCUMENT_FORMAT, AttributeValue::MimeMediaType("application/pdf".to_string())));

    let response = Response::new(Version::V2_0, 0x0000, 4, vec![unsupported, printer], vec![0x01, 0x02, 0x03]);
    let mut buf = Vec::new();
    encode_response(&mut buf, &response).unwrap();

    let (decoded, _rest) = MessageDecoder::new(Cursor::new(buf)).decode_response().unwrap();
    assert_eq!(decoded.unsupported_attributes().unwrap().attributes().len(), 3);
    let printer_group = decoded.printer_attribute_groups().next().unwrap();
    assert_eq!(printer_group.attributes().len(), 8);
    assert_eq!(
        printer_group.get(names::PRINTER_INFO).unwrap().value(),
        Some(&AttributeValue::Text("Samsung M288x Series".to_string()))
    );
    assert_eq!(decoded.data(), &[0x01, 0x02, 0x03]);
}
