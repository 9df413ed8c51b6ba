//! Outbound request state.
//!
//! # Design
//! A `Request` is plain data: method, endpoint, outbound headers and body.
//! It never touches the transport itself. The client pushes its state into
//! the transport session at send time, and the transport pulls body bytes
//! back out through `read_body`.

use crate::config::ConfigProvider;
use crate::data::Data;
use crate::header::{Direction, Header};
use crate::http::Method;
use crate::uri::Uri;

#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    header: Header,
    data: Data,
}

impl Request {
    pub fn new(host: &str, port: u16, path: &str, method: Method) -> Self {
        Self::with_uri(Uri::new(host, port, path), method)
    }

    pub fn from_config(
        config: &dyn ConfigProvider,
        service: &str,
        path: &str,
        method: Method,
    ) -> Self {
        Self::with_uri(Uri::from_config(config, service, path), method)
    }

    fn with_uri(uri: Uri, method: Method) -> Self {
        let mut header = Header::new(Direction::Output);
        header.set("Access-Control-Allow-Origin", "*");

        Self {
            method,
            uri,
            header,
            data: Data::new(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn uri_mut(&mut self) -> &mut Uri {
        &mut self.uri
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Pull hook: copy the next chunk of unsent body bytes into `buf`.
    ///
    /// Returns the number of bytes copied, 0 at end of body.
    pub fn read_body(&mut self, buf: &mut [u8]) -> usize {
        self.data.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;

    #[test]
    fn new_request_carries_cors_header() {
        let req = Request::new("127.0.0.1", 8080, "/ping", Method::Get);
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.uri().url(), "http://127.0.0.1:8080/ping");
        assert_eq!(req.header().get("Access-Control-Allow-Origin"), "*");
        assert_eq!(req.header().wire_lines(), ["Access-Control-Allow-Origin: *"]);
        assert!(req.data().is_empty());
    }

    #[test]
    fn from_config_uses_service_section() {
        let mut config = StaticConfig::new();
        config
            .set("services.users.host", "users.internal")
            .set("services.users.port", "9000");
        let req = Request::from_config(&config, "users", "/list", Method::Post);
        assert_eq!(req.uri().url(), "http://users.internal:9000/api/v1/list");
        assert_eq!(req.method(), Method::Post);
    }

    #[test]
    fn read_body_drains_request_data() {
        let mut req = Request::new("localhost", 80, "/", Method::Put);
        req.data_mut().set("payload");

        let mut buf = [0u8; 4];
        assert_eq!(req.read_body(&mut buf), 4);
        assert_eq!(&buf, b"payl");
        assert_eq!(req.read_body(&mut buf), 3);
        assert_eq!(&buf[..3], b"oad");
        assert_eq!(req.read_body(&mut buf), 0);
    }

    #[test]
    fn headers_are_mutable_after_construction() {
        let mut req = Request::new("localhost", 80, "/", Method::Get);
        req.header_mut().set("Accept", "text/plain");
        assert_eq!(
            req.header().wire_lines(),
            ["Accept: text/plain", "Access-Control-Allow-Origin: *"]
        );
    }
}
