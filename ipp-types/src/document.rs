//! The print data that follows the `end-of-attributes-tag` in a request.

use std::io::Read;

/// The document bytes attached to a `Print-Job`/`Send-Document` request.
///
/// IPP appends raw document data directly after the attribute section with
/// no further framing, so a client streams it straight from any [`Read`]
/// source rather than buffering it in memory up front.
pub struct Document<'a> {
    reader: Box<dyn Read + Send + 'a>,
    size: Option<u64>,
    format: Option<String>,
    name: Option<String>,
}

impl<'a> Document<'a> {
    pub fn new(reader: impl Read + Send + 'a) -> Self {
        Self {
            reader: Box::new(reader),
            size: None,
            format: None,
            name: None,
        }
    }

    /// Set the document's size in bytes, when known in advance (HTTP
    /// transports use this for `Content-Length` instead of chunked encoding).
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the `document-format` to send alongside this document, e.g.
    /// `"application/postscript"`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn reader_mut(&mut self) -> &mut (dyn Read + Send + 'a) {
        &mut self.reader
    }
}

impl<'a> Read for Document<'a> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<'a> std::fmt::Debug for Document<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("size", &self.size)
            .field("format", &self.format)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
