//! Transport session boundary.
//!
//! # Design
//! Everything that actually moves bytes lives behind `Transport`: the client
//! sets options on the session (method, URL, header list, upload length),
//! runs one blocking `perform`, and then asks for the status code. During
//! `perform` the engine talks back through a `Transfer`, which routes the
//! three hooks to the request body and the response being filled.
//!
//! `UreqTransport` is the default engine. It drives a blocking
//! `ureq::Agent` for HTTP framing and TLS. Redirects are not followed: a 3xx
//! answer is reported as-is, `Location` header included. The outbound body
//! is pulled through the read hook while the request is being written.

use std::io::{self, Read};

use crate::error::Error;
use crate::http::Method;
use crate::request::Request;
use crate::response::Response;

const CHUNK_SIZE: usize = 16 * 1024;

/// Hooks available to a transport while a transfer is running.
pub struct Transfer<'a> {
    request: &'a mut Request,
    response: &'a mut Response,
}

impl<'a> Transfer<'a> {
    pub fn new(request: &'a mut Request, response: &'a mut Response) -> Self {
        Self { request, response }
    }

    /// Pull the next chunk of outbound body bytes. Returns 0 at end.
    pub fn read_body(&mut self, buf: &mut [u8]) -> usize {
        self.request.read_body(buf)
    }

    /// Push one raw response header line, status line included.
    pub fn receive_header_line(&mut self, line: &str) {
        self.response.receive_header_line(line);
    }

    /// Push one inbound body chunk. Returns the number of bytes consumed.
    pub fn write_body(&mut self, chunk: &[u8]) -> usize {
        self.response.write_body(chunk)
    }
}

/// One reusable transport session.
///
/// Options persist across `perform` calls until overwritten.
pub trait Transport {
    fn set_method(&mut self, method: Method);

    fn set_url(&mut self, url: &str);

    /// Replace the whole outbound header list with `Name: Value` lines.
    fn set_header_list(&mut self, lines: &[String]);

    /// Number of body bytes the engine will pull through `read_body`.
    fn set_upload_length(&mut self, length: u64);

    /// Run one blocking transfer.
    fn perform(&mut self, transfer: &mut Transfer<'_>) -> Result<(), Error>;

    /// Status code of the last completed transfer.
    fn response_code(&self) -> Option<u16>;
}

/// Blocking transport backed by `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
    method: Method,
    url: String,
    header_lines: Vec<String>,
    upload_length: u64,
    status: Option<u16>,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .new_agent();
        Self::with_agent(agent)
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-configured agent (timeouts, proxies, TLS).
    ///
    /// The agent should have `http_status_as_error(false)`; otherwise 4xx/5xx
    /// answers surface as transport failures. With `max_redirects` above 0 the
    /// status and headers reported are those of the final hop.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self {
            agent,
            method: Method::Get,
            url: String::new(),
            header_lines: Vec::new(),
            upload_length: 0,
            status: None,
        }
    }

    fn build(&self) -> Result<ureq::http::request::Builder, Error> {
        let mut builder = ureq::http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str());
        for line in &self.header_lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::InvalidHeader(line.clone()))?;
            builder = builder.header(name.trim(), value.trim());
        }
        Ok(builder)
    }
}

/// Outbound body stream over the read hook, capped at the declared length.
struct Upload<'t, 'a> {
    transfer: &'t mut Transfer<'a>,
    remaining: u64,
}

impl Read for Upload<'_, '_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let cap = usize::try_from(self.remaining)
            .unwrap_or(usize::MAX)
            .min(buf.len());
        let n = self.transfer.read_body(&mut buf[..cap]);
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("request body ended {} bytes early", self.remaining),
            ));
        }
        self.remaining -= n as u64;
        Ok(n)
    }
}

impl Transport for UreqTransport {
    fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    fn set_header_list(&mut self, lines: &[String]) {
        self.header_lines = lines.to_vec();
    }

    fn set_upload_length(&mut self, length: u64) {
        self.upload_length = length;
    }

    fn perform(&mut self, transfer: &mut Transfer<'_>) -> Result<(), Error> {
        self.status = None;
        let builder = self.build()?;
        let transport_err = |e: ureq::http::Error| Error::Transport(e.to_string());

        let result = if self.upload_length == 0 {
            self.agent.run(builder.body(()).map_err(transport_err)?)
        } else {
            let mut upload = Upload {
                transfer: &mut *transfer,
                remaining: self.upload_length,
            };
            let request = builder
                .header("Content-Length", self.upload_length)
                .body(ureq::SendBody::from_reader(&mut upload))
                .map_err(transport_err)?;
            self.agent.run(request)
        };
        let mut response = result.map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        self.status = Some(status.as_u16());

        transfer.receive_header_line(&format!(
            "{:?} {} {}\r\n",
            response.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        ));
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes());
            transfer.receive_header_line(&format!("{name}: {value}\r\n"));
        }

        let mut reader = response.body_mut().as_reader();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let n = reader
                .read(&mut chunk)
                .map_err(|e| Error::Transport(e.to_string()))?;
            if n == 0 {
                break;
            }
            if transfer.write_body(&chunk[..n]) != n {
                return Err(Error::Transport("response body write aborted".to_string()));
            }
        }
        Ok(())
    }

    fn response_code(&self) -> Option<u16> {
        self.status
    }
}
