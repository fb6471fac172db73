//! Request payload variants and multipart form encoding.

use serde::Serialize;

use crate::error::{ClientError, Result};

/// The logical request body before wire encoding.
///
/// A closed set of variants over the body kinds the client accepts:
/// raw bytes and strings are sent verbatim, a [`FormData`] carries its
/// own multipart buffer and boundary content-type, and any serializable
/// value enters as JSON through [`Payload::json`]. Constructed per call
/// and consumed by request construction.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No request body.
    #[default]
    Empty,
    /// Raw bytes, sent verbatim with no content-type inference.
    Bytes(Vec<u8>),
    /// A string, sent as its UTF-8 bytes verbatim.
    Text(String),
    /// Multipart form data with its boundary content-type.
    Form(FormData),
    /// A JSON document, sent as its serialized text.
    Json(serde_json::Value),
}

impl Payload {
    /// Create a JSON payload from any serializable value.
    ///
    /// Serialization failure is fatal: it surfaces before any transport
    /// attempt is made and is never retried.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(ClientError::Encode)?;
        Ok(Self::Json(value))
    }

    /// Encode into body bytes plus an optional forced content-type.
    ///
    /// Only the multipart form variant forces a content-type; every
    /// other variant leaves the header to the configuration.
    pub(crate) fn encode(&self) -> Result<(Option<Vec<u8>>, Option<String>)> {
        match self {
            Self::Empty => Ok((None, None)),
            Self::Bytes(bytes) => Ok((Some(bytes.clone()), None)),
            Self::Text(text) => Ok((Some(text.clone().into_bytes()), None)),
            Self::Form(form) => Ok((Some(form.finish()), Some(form.content_type()))),
            Self::Json(value) => {
                let bytes = serde_json::to_vec(value).map_err(ClientError::Encode)?;
                Ok((Some(bytes), None))
            }
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<FormData> for Payload {
    fn from(form: FormData) -> Self {
        Self::Form(form)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// Multipart form data with a pre-built buffer.
///
/// Fields and file parts are appended to an owned buffer as they are
/// added; [`FormData::content_type`] exposes the boundary content-type
/// that must accompany the buffer on the wire.
#[derive(Debug, Clone)]
pub struct FormData {
    boundary: String,
    buf: Vec<u8>,
}

impl FormData {
    /// Create an empty form with a freshly generated boundary.
    pub fn new() -> Self {
        Self {
            boundary: format!("jhttp-{}", uuid::Uuid::new_v4().simple()),
            buf: Vec::new(),
        }
    }

    /// Append a text field.
    pub fn text(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.open_part();
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name.as_ref()
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(value.as_ref().as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Append a file part with an explicit filename and content-type.
    pub fn part(
        mut self,
        name: impl AsRef<str>,
        filename: impl AsRef<str>,
        content_type: impl AsRef<str>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.open_part();
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                name.as_ref(),
                filename.as_ref(),
                content_type.as_ref()
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(&bytes.into());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// The boundary content-type to send with this form.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    fn open_part(&mut self) {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
    }

    /// The complete body: all parts followed by the closing boundary.
    pub(crate) fn finish(&self) -> Vec<u8> {
        let mut body = self.buf.clone();
        body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        body
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}
