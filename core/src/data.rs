//! Body buffer shared by requests and responses.
//!
//! # Design
//! `Data` is an owned byte buffer with a content-type tag and a read cursor.
//! Responses grow it through `append` as chunks arrive; requests drain it
//! through `read` while the transport pulls outbound bytes. The cursor never
//! passes the end of the buffer.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// Content type assigned to a fresh buffer.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A request or response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    bytes: Vec<u8>,
    content_type: String,
    cursor: usize,
}

impl Default for Data {
    fn default() -> Self {
        Self::with_type(DEFAULT_CONTENT_TYPE)
    }
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer tagged with `content_type`.
    pub fn with_type(content_type: &str) -> Self {
        Self {
            bytes: Vec::new(),
            content_type: content_type.to_string(),
            cursor: 0,
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn set_type(&mut self, content_type: &str) {
        self.content_type = content_type.to_string();
    }

    /// Replace the whole body and reset the cursor.
    pub fn set(&mut self, bytes: impl Into<Vec<u8>>) {
        self.bytes = bytes.into();
        self.cursor = 0;
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Copy up to `buf.len()` unread bytes into `buf` and advance the cursor.
    ///
    /// Returns the number of bytes copied; 0 once the buffer is drained.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let unread = &self.bytes[self.cursor..];
        let n = unread.len().min(buf.len());
        buf[..n].copy_from_slice(&unread[..n]);
        self.cursor += n;
        n
    }

    /// Move the cursor back to the start so the body can be read again.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Total body length, independent of the cursor.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes not yet consumed by `read`.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Serialize `value` as the body and tag it `application/json`.
    pub fn set_json<T: Serialize>(&mut self, value: &T) -> Result<(), Error> {
        let encoded = serde_json::to_vec(value)?;
        self.set(encoded);
        self.set_type("application/json");
        Ok(())
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.bytes)?)
    }
}
