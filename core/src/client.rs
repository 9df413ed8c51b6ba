//! Synchronous client driving one transport session.
//!
//! # Design
//! `Client` owns exactly one transport session and one `Request`. Nothing
//! else holds a handle to the session: before each transfer the client
//! pushes the request's method, URL, header list and body length into it,
//! then runs one blocking `perform` with hooks routed to the request body and
//! a fresh `Response`.
//!
//! `send` never fails. A transport error leaves the response at 404 with
//! whatever partial headers and body were already received, and is logged.
//!
//! # Concurrency
//! `send` takes `&mut self` and reuses the request headers and body between
//! calls. Use one client per thread, or wrap it in a lock.

use crate::config::ConfigProvider;
use crate::http::Method;
use crate::request::Request;
use crate::response::{Response, NOT_FOUND};
use crate::transport::{Transfer, Transport, UreqTransport};

pub struct Client<T: Transport = UreqTransport> {
    transport: T,
    request: Request,
}

impl Client<UreqTransport> {
    pub fn new(host: &str, port: u16, path: &str, method: Method) -> Self {
        Self::with_transport(UreqTransport::new(), Request::new(host, port, path, method))
    }

    /// Client for the `services.<service>` endpoint described in `config`.
    pub fn from_config(
        config: &dyn ConfigProvider,
        service: &str,
        path: &str,
        method: Method,
    ) -> Self {
        Self::with_transport(
            UreqTransport::new(),
            Request::from_config(config, service, path, method),
        )
    }
}

impl Default for Client<UreqTransport> {
    /// `GET http://127.0.0.1:80/`.
    fn default() -> Self {
        Self::new("127.0.0.1", 80, "/", Method::Get)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, request: Request) -> Self {
        Self { transport, request }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one blocking transfer and return its response.
    pub fn send(&mut self) -> Response {
        let content_type = format!("{}; charset=UTF-8", self.request.data().content_type());
        self.request.header_mut().set("Content-Type", &content_type);

        let mut response = Response::new();
        let method = self.request.method();
        let url = self.request.uri().url().to_string();

        self.request.data_mut().rewind();
        let upload_length = self.request.data().len() as u64;

        self.transport.set_method(method);
        self.transport.set_url(&url);
        self.transport
            .set_header_list(self.request.header().wire_lines());
        self.transport.set_upload_length(upload_length);
        tracing::debug!(
            headers = self.request.header().len(),
            upload_length,
            "transport session prepared"
        );

        let result = self
            .transport
            .perform(&mut Transfer::new(&mut self.request, &mut response));
        let code = match result {
            Ok(()) => self.transport.response_code().unwrap_or(NOT_FOUND),
            Err(err) => {
                tracing::error!(error = %err, "HTTP request failed");
                NOT_FOUND
            }
        };

        tracing::info!(method = %method, url = %url, code, "HTTP request");

        response.set_code(code);
        response
    }
}
