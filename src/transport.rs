//! How an encoded IPP request reaches a printer, and how its response comes
//! back: over plain HTTP(S) to a network printer, or over a CUPS domain
//! socket with local-auth-cookie retry.

use std::fmt::Display;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, warn};

use crate::error::TransportError;

/// The IPP-over-HTTP content type (RFC 8010 §3.4).
pub const CONTENT_TYPE_IPP: &str = "application/ipp";

/// A cooperative cancellation/deadline signal passed into [`Transport::send`].
///
/// Blocking transports (this crate uses `ureq` and raw `UnixStream`s, not an
/// async runtime) can't abort in-flight I/O the way a future can be dropped;
/// instead, transports poll the token at the points they already loop —
/// between retry attempts and between response-body read chunks — so a
/// cancellation is honored within one chunk's latency rather than only after
/// the full response has been read.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent; safe to call from any thread.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

fn check_cancelled(cancel: Option<&CancelToken>) -> Result<(), TransportError> {
    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(TransportError::Canceled);
    }
    Ok(())
}

/// Read `reader` to exhaustion, checking `cancel` between chunks so a long
/// response body doesn't block a cancellation indefinitely.
fn read_with_cancel(mut reader: impl Read, cancel: Option<&CancelToken>) -> Result<Vec<u8>, TransportError> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        check_cancelled(cancel)?;
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            return Ok(buf);
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// An abstract channel a [`crate::client::Client`] sends requests over.
///
/// Implementors own everything below "here are request bytes, here is an
/// optional document reader" — connection setup, HTTP framing, retries, and
/// authentication specifics are all transport concerns, not client
/// concerns.
pub trait Transport {
    /// Send `request_bytes` (the encoded envelope) followed by the contents
    /// of `document`, if any, and return the full response body. If `cancel`
    /// is signaled before or during the send, returns
    /// [`TransportError::Canceled`] instead.
    fn send(
        &mut self,
        request_bytes: &[u8],
        document: Option<&mut dyn Read>,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, TransportError>;

    /// Cheaply verify the transport can reach the printer, without sending
    /// an IPP request.
    fn test_connection(&mut self) -> Result<(), TransportError>;

    /// Compose the URL (or, for transports with no URL scheme, the path)
    /// this transport would use to reach `{namespace}/{object}` — e.g.
    /// `("printers", Some("office"))` → `.../printers/office`,
    /// `("admin", None)` → `.../admin`. An empty namespace with no object
    /// names the server root.
    fn build_url(&self, namespace: &str, object: Option<&dyn Display>) -> String;
}

/// Sends requests over HTTP or HTTPS using a blocking client, the
/// transport used for network-attached and IPP-Everywhere printers.
pub struct HttpTransport {
    agent: ureq::Agent,
    host: String,
    port: u16,
    tls: bool,
    basic_auth: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(host: impl Into<String>, port: u16, tls: bool) -> Self {
        Self::with_agent(host, port, tls, ureq::AgentBuilder::new().timeout(Duration::from_secs(30)).build())
    }

    pub fn with_agent(host: impl Into<String>, port: u16, tls: bool, agent: ureq::Agent) -> Self {
        Self {
            agent,
            host: host.into(),
            port,
            tls,
            basic_auth: None,
        }
    }

    /// Send HTTP Basic authentication with every request. A blank username
    /// and password (the common case for a trusted network printer) leaves
    /// the header off entirely.
    pub fn with_basic_auth(mut self, user: &str, password: &str) -> Self {
        if !user.is_empty() || !password.is_empty() {
            self.basic_auth = Some((user.to_string(), password.to_string()));
        }
        self
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    fn send(
        &mut self,
        request_bytes: &[u8],
        document: Option<&mut dyn Read>,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, TransportError> {
        check_cancelled(cancel)?;

        // The request body's total length has to be known up front to send
        // a fixed `Content-Length` instead of falling back to chunked
        // transfer-encoding, so the envelope and document are concatenated
        // into one buffer before the request is issued.
        let mut body = request_bytes.to_vec();
        if let Some(doc) = document {
            doc.read_to_end(&mut body)?;
        }

        let url = self.build_url("", None);
        debug!("POST {url} ({} byte body)", body.len());

        let mut request = self.agent.post(&url).set("Content-Type", CONTENT_TYPE_IPP);
        if let Some((user, password)) = &self.basic_auth {
            let credentials = BASE64.encode(format!("{user}:{password}"));
            request = request.set("Authorization", &format!("Basic {credentials}"));
        }

        check_cancelled(cancel)?;
        let response = request.send_bytes(&body)?;

        if response.status() != 200 {
            return Err(TransportError::UnexpectedStatus(response.status()));
        }

        read_with_cancel(response.into_reader(), cancel)
    }

    fn test_connection(&mut self) -> Result<(), TransportError> {
        let url = self.build_url("", None);
        match self.agent.get(&url).call() {
            Ok(_) => Ok(()),
            // Any HTTP-level response, even an error status, means we reached the server.
            Err(ureq::Error::Status(_, _)) => Ok(()),
            Err(other) => Err(TransportError::from(other)),
        }
    }

    fn build_url(&self, namespace: &str, object: Option<&dyn Display>) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        let mut url = format!("{scheme}://{}:{}", self.host, self.port);
        if !namespace.is_empty() {
            url.push('/');
            url.push_str(namespace);
        }
        if let Some(object) = object {
            let object = object.to_string();
            if !object.is_empty() {
                url.push('/');
                url.push_str(&object);
            }
        }
        url
    }
}

/// Known locations of the CUPS domain socket, checked in order.
pub const DEFAULT_SOCKET_SEARCH_PATHS: &[&str] = &[
    "/var/run/cupsd",
    "/var/run/cups/cups.sock",
    "/run/cups/cups.sock",
    "/private/var/run/cupsd",
];

/// Known locations of the CUPS local-auth certificate, checked in order.
pub const DEFAULT_CERT_SEARCH_PATHS: &[&str] = &["/etc/cups/certs/0", "/run/cups/certs/0"];

const DEFAULT_RETRY_LIMIT: u32 = 3;

/// Sends requests over the CUPS Unix-domain socket, authenticating with the
/// `Local <cert>` scheme CUPS expects from same-host clients.
///
/// A generic HTTP client can't be pointed at a bare Unix socket, so this
/// transport speaks just enough HTTP/1.1 itself: a request line, three
/// fixed headers, the envelope, and the optional document, then reads back
/// a status line, headers, and a length-delimited body.
pub struct UnixTransport {
    host: String,
    path: String,
    socket_search_paths: Vec<PathBuf>,
    cert_search_paths: Vec<PathBuf>,
    retry_limit: u32,
}

impl std::fmt::Debug for UnixTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixTransport")
            .field("host", &self.host)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl UnixTransport {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            socket_search_paths: DEFAULT_SOCKET_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            cert_search_paths: DEFAULT_CERT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    pub fn with_socket_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.socket_search_paths = paths;
        self
    }

    pub fn with_retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = limit;
        self
    }

    fn locate_socket(&self) -> Result<&Path, TransportError> {
        for candidate in &self.socket_search_paths {
            if let Ok(metadata) = std::fs::symlink_metadata(candidate) {
                use std::os::unix::fs::FileTypeExt;
                if metadata.file_type().is_socket() {
                    return Ok(candidate);
                }
            }
        }
        Err(TransportError::SocketNotFound(self.socket_search_paths.len()))
    }

    fn read_cert(&self) -> Option<String> {
        for candidate in &self.cert_search_paths {
            if let Ok(contents) = std::fs::read_to_string(candidate) {
                return Some(contents.trim().to_string());
            }
        }
        None
    }

    fn send_once(
        &self,
        socket: &Path,
        cert: Option<&str>,
        request_bytes: &[u8],
        document: &mut Option<&mut dyn Read>,
        cancel: Option<&CancelToken>,
    ) -> Result<(u16, Vec<u8>), TransportError> {
        check_cancelled(cancel)?;
        let mut stream = UnixStream::connect(socket)?;

        let mut document_buf = Vec::new();
        if let Some(doc) = document.as_deref_mut() {
            doc.read_to_end(&mut document_buf)?;
        }
        let content_length = request_bytes.len() + document_buf.len();

        write!(
            stream,
            "POST {} HTTP/1.1\r\n\
             Host: {}\r\n\
             Content-Type: {CONTENT_TYPE_IPP}\r\n\
             Content-Length: {content_length}\r\n",
            self.path, self.host,
        )?;
        if let Some(cert) = cert {
            write!(stream, "Authorization: Local {cert}\r\n")?;
        }
        write!(stream, "Connection: close\r\n\r\n")?;
        stream.write_all(request_bytes)?;
        stream.write_all(&document_buf)?;
        stream.flush()?;

        check_cancelled(cancel)?;
        read_http_response(&mut stream)
    }
}

impl Transport for UnixTransport {
    fn send(
        &mut self,
        request_bytes: &[u8],
        mut document: Option<&mut dyn Read>,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<u8>, TransportError> {
        check_cancelled(cancel)?;
        let socket = self.locate_socket()?.to_path_buf();

        for attempt in 0..self.retry_limit {
            check_cancelled(cancel)?;
            let cert = self.read_cert();
            let (status, body) = self.send_once(&socket, cert.as_deref(), request_bytes, &mut document, cancel)?;

            if status == 401 {
                warn!("CUPS local auth rejected (attempt {}), retrying with fresh cert", attempt + 1);
                continue;
            }
            if status != 200 {
                return Err(TransportError::UnexpectedStatus(status));
            }
            return Ok(body);
        }

        Err(TransportError::LocalAuthFailed)
    }

    fn test_connection(&mut self) -> Result<(), TransportError> {
        let socket = self.locate_socket()?;
        UnixStream::connect(socket)?;
        Ok(())
    }

    fn build_url(&self, namespace: &str, object: Option<&dyn Display>) -> String {
        let mut path = String::new();
        if !namespace.is_empty() {
            path.push('/');
            path.push_str(namespace);
        }
        if let Some(object) = object {
            let object = object.to_string();
            if !object.is_empty() {
                path.push('/');
                path.push_str(&object);
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}

/// Parse a minimal HTTP/1.1 response off `stream`: status line, headers
/// (only `Content-Length` is consulted), then exactly that many body bytes.
fn read_http_response(stream: &mut UnixStream) -> Result<(u16, Vec<u8>), TransportError> {
    let mut reader = std::io::BufReader::new(stream);
    let mut status_line = String::new();
    read_line(&mut reader, &mut status_line)?;

    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or(TransportError::MalformedResponse)?;

    let mut content_length: Option<usize> = None;
    loop {
        let mut line = String::new();
        read_line(&mut reader, &mut line)?;
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok();
            }
        }
    }

    let mut body = Vec::new();
    match content_length {
        Some(len) => {
            body.resize(len, 0);
            reader.read_exact(&mut body)?;
        }
        None => {
            reader.read_to_end(&mut body)?;
        }
    }
    Ok((status, body))
}

fn read_line(reader: &mut impl std::io::BufRead, out: &mut String) -> Result<(), TransportError> {
    let mut raw = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        let n = reader.read(&mut byte)?;
        if n == 0 {
            break;
        }
        if byte[0] == b'\n' {
            break;
        }
        if byte[0] != b'\r' {
            raw.push(byte[0]);
        }
    }
    *out = String::from_utf8(raw).map_err(|_| TransportError::MalformedResponse)?;
    Ok(())
}
