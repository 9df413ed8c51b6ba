//! Inbound response state.
//!
//! # Design
//! A fresh `Response` is created for every send. The transport fills it
//! through two push hooks: `receive_header_line` for each raw header line
//! and `write_body` for each body chunk. The status stays at 404 until the
//! client records the transport's reported code.

use crate::data::Data;
use crate::header::{Direction, Header};

/// Status assigned to a response before a transfer succeeds.
pub const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone)]
pub struct Response {
    code: u16,
    header: Header,
    data: Data,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            code: NOT_FOUND,
            header: Header::new(Direction::Input),
            data: Data::new(),
        }
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn set_code(&mut self, code: u16) {
        self.code = code;
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Set `code` and replace the body with `message`.
    ///
    /// For responses that never went through a transfer.
    pub fn set_error(&mut self, code: u16, message: &str) {
        self.set_code(code);
        self.data.set(message);
    }

    /// Header hook: store one raw `Name: Value` line.
    pub fn receive_header_line(&mut self, line: &str) {
        self.header.set_line(line);
    }

    /// Body hook: append `chunk` and report it fully consumed.
    pub fn write_body(&mut self, chunk: &[u8]) -> usize {
        self.data.append(chunk);
        chunk.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_not_found() {
        let resp = Response::new();
        assert_eq!(resp.code(), NOT_FOUND);
        assert!(resp.header().is_empty());
        assert!(resp.data().is_empty());
    }

    #[test]
    fn write_body_reports_full_chunk() {
        let mut resp = Response::new();
        assert_eq!(resp.write_body(b"abc"), 3);
        assert_eq!(resp.write_body(b""), 0);
        assert_eq!(resp.write_body(b"def"), 3);
        assert_eq!(resp.data().as_bytes(), b"abcdef");
    }

    #[test]
    fn header_hook_parses_lines() {
        let mut resp = Response::new();
        resp.receive_header_line("HTTP/1.1 200 OK\r\n");
        resp.receive_header_line("content-type: text/plain\r\n");
        resp.receive_header_line("\r\n");
        assert_eq!(resp.header().len(), 1);
        assert_eq!(resp.header().get("content-type"), "text/plain");
        assert!(resp.header().wire_lines().is_empty());
    }

    #[test]
    fn set_error_replaces_body() {
        let mut resp = Response::new();
        resp.write_body(b"partial");
        resp.set_error(503, "service unavailable");
        assert_eq!(resp.code(), 503);
        assert_eq!(resp.data().text(), "service unavailable");
    }
}
