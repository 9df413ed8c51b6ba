//! Synchronous HTTP client façade for calling configured services.
//!
//! # Overview
//! Build a request from an explicit host/port/path or from a
//! `services.<name>` configuration section, attach headers and a body, send
//! it through a blocking transport session and read back the status, headers
//! and body.
//!
//! # Design
//! - `Client` owns the only handle to the transport session and pushes the
//!   request's state into it before each transfer.
//! - `Request`, `Response`, `Header`, `Uri` and `Data` are plain values; the
//!   transport reaches them only through the hooks on `Transfer`.
//! - The request/response surface is total: failures become a 404 response
//!   plus a `tracing` event, never a panic or an `Err`.
//! - `UreqTransport` is the default engine; any `Transport` can be plugged in.

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod header;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod uri;

pub use client::Client;
pub use config::{ConfigProvider, FigmentConfig, StaticConfig};
pub use data::Data;
pub use error::Error;
pub use header::{Direction, Header};
pub use http::Method;
pub use request::Request;
pub use response::Response;
pub use transport::{Transfer, Transport, UreqTransport};
pub use uri::Uri;
