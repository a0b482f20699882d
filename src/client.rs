//! The operation-builder façade: one method per request this crate knows
//! how to construct, each returning the caller-relevant slice of the
//! response rather than the raw [`Response`].

use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use ipp_types::attribute::names;
use ipp_types::document::Document;
use ipp_types::group::AttributeGroup;
use ipp_types::message::{Request, Response};
use ipp_types::operation::Operation;
use ipp_types::tag::GroupTag;
use ipp_types::value::AttributeValue;
use ipp_types::Attribute;
use log::debug;

use crate::error::ClientError;
use crate::message::{encode_request, MessageDecoder};
use crate::transport::{HttpTransport, Transport};

const DEFAULT_JOB_PRIORITY: i32 = 50;
const DEFAULT_COPIES: i32 = 1;

/// Job-template attributes a caller can set for `Print-Job`/`Print-Uri`
/// style requests. Everything is optional; unset fields fall back to the
/// defaults CUPS itself assumes (`copies=1`, `job-priority=50`).
#[derive(Clone, Debug, Default)]
pub struct JobAttributes {
    pub job_name: Option<String>,
    pub copies: Option<i32>,
    pub job_priority: Option<i32>,
    pub document_format: Option<String>,
    pub media: Option<String>,
    pub job_hold_until: Option<String>,
    /// Attributes not covered by the fields above, applied verbatim.
    pub extra: Vec<Attribute>,
}

impl JobAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job_name(mut self, name: impl Into<String>) -> Self {
        self.job_name = Some(name.into());
        self
    }

    pub fn with_copies(mut self, copies: i32) -> Self {
        self.copies = Some(copies);
        self
    }

    pub fn with_job_priority(mut self, priority: i32) -> Self {
        self.job_priority = Some(priority);
        self
    }
}

/// The `which-jobs` operation attribute for [`Client::get_jobs`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WhichJobs {
    NotCompleted,
    Completed,
    All,
}

impl WhichJobs {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotCompleted => "not-completed",
            Self::Completed => "completed",
            Self::All => "all",
        }
    }
}

/// A client-side handle to a single printer or CUPS server.
///
/// Holds the one piece of long-lived state this crate needs: the transport
/// (connection parameters, HTTP client handle, and for the Unix transport,
/// the retry/auth-cookie bookkeeping). Requests are otherwise stateless:
/// each call builds a fresh [`Request`], sends it, and decodes the
/// response.
pub struct Client {
    user: String,
    transport: Mutex<Box<dyn Transport + Send>>,
    next_request_id: AtomicI32,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("user", &self.user).finish_non_exhaustive()
    }
}

impl Client {
    /// Connect to `host:port` over HTTP(S), the transport for
    /// network-attached and IPP-Everywhere printers.
    pub fn new(host: &str, port: u16, user: &str, password: &str, tls: bool) -> Self {
        let transport = HttpTransport::new(host, port, tls).with_basic_auth(user, password);
        Self::with_transport(user, Box::new(transport))
    }

    /// Build a client over an arbitrary [`Transport`] — the Unix-socket
    /// transport for talking to the local CUPS daemon, or a mock in tests.
    pub fn with_transport(user: impl Into<String>, transport: Box<dyn Transport + Send>) -> Self {
        Self {
            user: user.into(),
            transport: Mutex::new(transport),
            next_request_id: AtomicI32::new(1),
        }
    }

    fn new_request(&self, operation: Operation) -> Request {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let mut request = Request::new(operation.as_i16(), id);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::REQUESTING_USER_NAME, AttributeValue::name(self.user.clone())));
        }
        request
    }

    fn execute(&self, request: &Request, document: Option<&mut dyn Read>) -> Result<Response, ClientError> {
        let mut buf = Vec::new();
        encode_request(&mut buf, request)?;
        debug!(
            "sending operation {:#06x} (request-id {})",
            request.operation_id, request.request_id
        );

        let response_bytes = {
            let mut transport = self.transport.lock().expect("transport mutex poisoned");
            transport.send(&buf, document, None)?
        };

        let (response, _rest) = MessageDecoder::new(Cursor::new(response_bytes)).decode_response()?;
        if !response.is_success() {
            let unsupported = response
                .unsupported_attributes()
                .map(|group| group.attributes().iter().map(|a| a.name().to_string()).collect())
                .unwrap_or_default();
            return Err(ClientError::Rejected {
                status: response.status_code,
                request_id: response.request_id,
                unsupported,
                message: status_message(&response),
            });
        }
        Ok(response)
    }

    fn push_requested_attributes(group: &mut AttributeGroup, attrs: Option<&[&str]>) {
        if let Some(requested) = attrs {
            if let Some(first) = requested.first() {
                let mut values = vec![AttributeValue::keyword(*first)];
                values.extend(requested[1..].iter().map(|n| AttributeValue::keyword(*n)));
                group.push(Attribute::with_values(names::REQUESTED_ATTRIBUTES, values));
            }
        }
    }

    fn job_attributes_group(request: &mut Request, attrs: &JobAttributes) {
        let ops = request.operation_attributes_mut();
        if let Some(name) = &attrs.job_name {
            ops.push(Attribute::new(names::JOB_NAME, AttributeValue::name(name.clone())));
        }
        ops.push(Attribute::new(
            names::COPIES,
            AttributeValue::Integer(attrs.copies.unwrap_or(DEFAULT_COPIES)),
        ));
        ops.push(Attribute::new(
            names::JOB_PRIORITY,
            AttributeValue::Integer(attrs.job_priority.unwrap_or(DEFAULT_JOB_PRIORITY)),
        ));
        if let Some(format) = &attrs.document_format {
            ops.push(Attribute::new(names::DOCUMENT_FORMAT, AttributeValue::MimeMediaType(format.clone())));
        }
        if let Some(media) = &attrs.media {
            ops.push(Attribute::new(names::MEDIA, AttributeValue::keyword(media.clone())));
        }
        if let Some(hold) = &attrs.job_hold_until {
            ops.push(Attribute::new(names::JOB_HOLD_UNTIL, AttributeValue::keyword(hold.clone())));
        }
        for extra in &attrs.extra {
            ops.push(extra.clone());
        }
    }

    fn job_id_from_response(response: &Response) -> Option<i32> {
        response
            .job_attribute_groups()
            .next()
            .and_then(|g| g.get(names::JOB_ID))
            .and_then(|a| a.value())
            .and_then(|v| match v {
                AttributeValue::Integer(i) => Some(*i),
                _ => None,
            })
    }

    /// `Print-Job`: submit one document for printing, returning the
    /// assigned `job-id`.
    pub fn print_job(&self, mut doc: Document<'_>, printer: &str, attrs: JobAttributes) -> Result<i32, ClientError> {
        let mut request = self.new_request(Operation::PrintJob);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
        }
        let format = attrs.document_format.clone().or_else(|| doc.format().map(str::to_string));
        let mut attrs = attrs;
        if attrs.document_format.is_none() {
            attrs.document_format = format;
        }
        if attrs.job_name.is_none() {
            attrs.job_name = doc.name().map(str::to_string);
        }
        Self::job_attributes_group(&mut request, &attrs);

        let response = self.execute(&request, Some(doc.reader_mut()))?;
        let message = status_message(&response);
        Self::job_id_from_response(&response).ok_or(ClientError::Rejected {
            status: response.status_code,
            request_id: response.request_id,
            unsupported: Vec::new(),
            message,
        })
    }

    /// `Create-Job` followed by one `Send-Document` per document (the last
    /// marked `last-document=true`), returning the assigned `job-id`.
    pub fn print_documents(
        &self,
        docs: Vec<Document<'_>>,
        printer: &str,
        attrs: JobAttributes,
    ) -> Result<i32, ClientError> {
        let mut create = self.new_request(Operation::CreateJob);
        {
            let ops = create.operation_attributes_mut();
            ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
        }
        Self::job_attributes_group(&mut create, &attrs);
        let response = self.execute(&create, None)?;
        let message = status_message(&response);
        let job_id = Self::job_id_from_response(&response).ok_or(ClientError::Rejected {
            status: response.status_code,
            request_id: response.request_id,
            unsupported: Vec::new(),
            message,
        })?;

        let total = docs.len();
        for (index, mut doc) in docs.into_iter().enumerate() {
            let mut send = self.new_request(Operation::SendDocument);
            {
                let ops = send.operation_attributes_mut();
                ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
                ops.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(job_id)));
                ops.push(Attribute::new(
                    names::LAST_DOCUMENT,
                    AttributeValue::Boolean(index + 1 == total),
                ));
            }
            self.execute(&send, Some(doc.reader_mut()))?;
        }

        Ok(job_id)
    }

    /// Print a minimal PostScript banner page via `Print-Job`, useful for
    /// verifying end-to-end connectivity to a printer.
    pub fn print_test_page(&self, printer: &str) -> Result<i32, ClientError> {
        const BANNER: &[u8] = b"%!PS-Adobe-3.0\n%%Pages: 1\n%%EndComments\n%%Page: 1 1\nshowpage\n%%EOF\n";
        let doc = Document::new(Cursor::new(BANNER))
            .with_size(BANNER.len() as u64)
            .with_format("application/postscript")
            .with_name("test-page");
        self.print_job(doc, printer, JobAttributes::new())
    }

    /// `Get-Printer-Attributes`, returning the single `printer-attributes`
    /// group the server reports.
    pub fn get_printer_attributes(&self, printer: &str, attrs: Option<&[&str]>) -> Result<AttributeGroup, ClientError> {
        let mut request = self.new_request(Operation::GetPrinterAttributes);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
            Self::push_requested_attributes(ops, attrs);
        }
        let response = self.execute(&request, None)?;
        let message = status_message(&response);
        response
            .printer_attribute_groups()
            .next()
            .cloned()
            .ok_or(ClientError::Rejected {
                status: response.status_code,
                request_id: response.request_id,
                unsupported: Vec::new(),
                message,
            })
    }

    /// `Get-Jobs`, returning one `job-attributes` group per job.
    #[allow(clippy::too_many_arguments)]
    pub fn get_jobs(
        &self,
        printer: &str,
        which: WhichJobs,
        my_jobs: bool,
        first_index: Option<i32>,
        limit: Option<i32>,
        attrs: Option<&[&str]>,
    ) -> Result<Vec<AttributeGroup>, ClientError> {
        let mut request = self.new_request(Operation::GetJobs);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
            ops.push(Attribute::new(names::WHICH_JOBS, AttributeValue::keyword(which.as_str())));
            ops.push(Attribute::new(names::MY_JOBS, AttributeValue::Boolean(my_jobs)));
            if let Some(first) = first_index {
                ops.push(Attribute::new(names::FIRST_JOB_ID, AttributeValue::Integer(first)));
            }
            if let Some(limit) = limit {
                ops.push(Attribute::new(names::LIMIT, AttributeValue::Integer(limit)));
            }
            Self::push_requested_attributes(ops, attrs);
        }
        let response = self.execute(&request, None)?;
        Ok(response.job_attribute_groups().cloned().collect())
    }

    /// `Get-Job-Attributes` for a single job-id.
    pub fn get_job_attributes(&self, job_id: i32, attrs: Option<&[&str]>) -> Result<AttributeGroup, ClientError> {
        let mut request = self.new_request(Operation::GetJobAttributes);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(job_id)));
            Self::push_requested_attributes(ops, attrs);
        }
        let response = self.execute(&request, None)?;
        let message = status_message(&response);
        response
            .job_attribute_groups()
            .next()
            .cloned()
            .or_else(|| response.group(GroupTag::OperationAttributes).cloned())
            .ok_or(ClientError::Rejected {
                status: response.status_code,
                request_id: response.request_id,
                unsupported: Vec::new(),
                message,
            })
    }

    /// `Cancel-Job`.
    pub fn cancel_job(&self, job_id: i32, purge: bool) -> Result<(), ClientError> {
        let mut request = self.new_request(Operation::CancelJob);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(job_id)));
            ops.push(Attribute::new(names::PURGE_JOBS, AttributeValue::Boolean(purge)));
        }
        self.execute(&request, None).map(drop)
    }

    /// `Restart-Job`.
    pub fn restart_job(&self, job_id: i32) -> Result<(), ClientError> {
        let mut request = self.new_request(Operation::RestartJob);
        request
            .operation_attributes_mut()
            .push(Attribute::new(names::JOB_ID, AttributeValue::Integer(job_id)));
        self.execute(&request, None).map(drop)
    }

    /// `Hold-Job` with a `job-hold-until` value.
    pub fn hold_job_until(&self, job_id: i32, until: &str) -> Result<(), ClientError> {
        let mut request = self.new_request(Operation::HoldJob);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(job_id)));
            ops.push(Attribute::new(names::JOB_HOLD_UNTIL, AttributeValue::keyword(until)));
        }
        self.execute(&request, None).map(drop)
    }

    /// `Pause-Printer`.
    pub fn pause_printer(&self, printer: &str) -> Result<(), ClientError> {
        self.printer_operation(Operation::PausePrinter, printer)
    }

    /// `Resume-Printer`.
    pub fn resume_printer(&self, printer: &str) -> Result<(), ClientError> {
        self.printer_operation(Operation::ResumePrinter, printer)
    }

    fn printer_operation(&self, operation: Operation, printer: &str) -> Result<(), ClientError> {
        let mut request = self.new_request(operation);
        request
            .operation_attributes_mut()
            .push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
        self.execute(&request, None).map(drop)
    }

    /// Verify the transport can reach the server without issuing an IPP
    /// request.
    pub fn test_connection(&self) -> Result<(), ClientError> {
        let mut transport = self.transport.lock().expect("transport mutex poisoned");
        transport.test_connection().map_err(ClientError::from)
    }

    // -- CUPS admin extensions -------------------------------------------------

    /// `CUPS-Add-Modify-Printer`.
    pub fn cups_add_modify_printer(&self, printer: &str, device_uri: &str, attrs: Vec<Attribute>) -> Result<(), ClientError> {
        let mut request = self.new_request(Operation::CupsAddModifyPrinter);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(printer))));
            ops.push(Attribute::new(names::DEVICE_URI, AttributeValue::uri(device_uri)));
            for attr in attrs {
                ops.push(attr);
            }
        }
        self.execute(&request, None).map(drop)
    }

    /// `CUPS-Delete-Printer`.
    pub fn cups_delete_printer(&self, printer: &str) -> Result<(), ClientError> {
        self.printer_operation(Operation::CupsDeletePrinter, printer)
    }

    /// `CUPS-Add-Modify-Class`.
    pub fn cups_add_modify_class(&self, class: &str, member_uris: &[&str]) -> Result<(), ClientError> {
        let mut request = self.new_request(Operation::CupsAddModifyClass);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::PRINTER_URI, AttributeValue::uri(printer_uri(class))));
            if let Some(first) = member_uris.first() {
                let mut values = vec![AttributeValue::uri(*first)];
                values.extend(member_uris[1..].iter().map(|u| AttributeValue::uri(*u)));
                ops.push(Attribute::with_values(names::MEMBER_URIS, values));
            }
        }
        self.execute(&request, None).map(drop)
    }

    /// `CUPS-Delete-Class`.
    pub fn cups_delete_class(&self, class: &str) -> Result<(), ClientError> {
        self.printer_operation(Operation::CupsDeleteClass, class)
    }

    /// `CUPS-Accept-Jobs`.
    pub fn cups_accept_jobs(&self, printer: &str) -> Result<(), ClientError> {
        self.printer_operation(Operation::CupsAcceptJobs, printer)
    }

    /// `CUPS-Reject-Jobs`.
    pub fn cups_reject_jobs(&self, printer: &str) -> Result<(), ClientError> {
        self.printer_operation(Operation::CupsRejectJobs, printer)
    }

    /// `CUPS-Move-Job`: reassign a job to a different printer.
    pub fn cups_move_job(&self, job_id: i32, destination_printer: &str) -> Result<(), ClientError> {
        let mut request = self.new_request(Operation::CupsMoveJob);
        {
            let ops = request.operation_attributes_mut();
            ops.push(Attribute::new(names::JOB_ID, AttributeValue::Integer(job_id)));
            ops.push(Attribute::new(
                names::JOB_PRINTER_URI,
                AttributeValue::uri(printer_uri(destination_printer)),
            ));
        }
        self.execute(&request, None).map(drop)
    }

    /// `CUPS-Get-Printers`, returning one group per printer known to the server.
    pub fn cups_get_printers(&self) -> Result<Vec<AttributeGroup>, ClientError> {
        let request = self.new_request(Operation::CupsGetPrinters);
        let response = self.execute(&request, None)?;
        Ok(response.printer_attribute_groups().cloned().collect())
    }

    /// `CUPS-Get-Classes`.
    pub fn cups_get_classes(&self) -> Result<Vec<AttributeGroup>, ClientError> {
        let request = self.new_request(Operation::CupsGetClasses);
        let response = self.execute(&request, None)?;
        Ok(response.printer_attribute_groups().cloned().collect())
    }

    /// `CUPS-Get-Devices`.
    pub fn cups_get_devices(&self) -> Result<Vec<AttributeGroup>, ClientError> {
        let request = self.new_request(Operation::CupsGetDevices);
        let response = self.execute(&request, None)?;
        Ok(response.groups().to_vec())
    }

    /// `CUPS-Get-PPDs`.
    pub fn cups_get_ppds(&self) -> Result<Vec<AttributeGroup>, ClientError> {
        let request = self.new_request(Operation::CupsGetPpds);
        let response = self.execute(&request, None)?;
        Ok(response.groups().to_vec())
    }
}

/// Read the `status-message` operation attribute out of a rejected
/// response, defaulting to an empty string when the printer didn't send one.
fn status_message(response: &Response) -> String {
    response
        .group(GroupTag::OperationAttributes)
        .and_then(|ops| ops.get(names::STATUS_MESSAGE))
        .and_then(|attr| attr.value())
        .and_then(|value| match value {
            AttributeValue::Text(s) => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

fn printer_uri(printer: &str) -> String {
    if printer.starts_with("ipp://") || printer.starts_with("ipps://") {
        printer.to_string()
    } else {
        format!("ipp://localhost/printers/{printer}")
    }
}
