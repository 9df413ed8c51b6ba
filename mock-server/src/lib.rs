use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the echo route saw: method, headers and body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/api/v1/echo", any(echo))
        .route("/api/v1/status/{code}", any(status))
        .route("/api/v1/stream/{len}", get(stream))
        .route("/api/v1/redirect", any(redirect))
        .route("/api/v1/raw-header", get(raw_header))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    tracing::debug!(%method, len = body.len(), "echo");
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn status(
    Path(code): Path<u16>,
) -> Result<(StatusCode, [(&'static str, String); 1], String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((
        status,
        [("x-mock-status", code.to_string())],
        format!("status {code}"),
    ))
}

/// Target of the `Location` header sent by the redirect route.
pub const REDIRECT_TARGET: &str = "/api/v1/status/201";

async fn redirect() -> (StatusCode, [(header::HeaderName, &'static str); 1]) {
    (StatusCode::FOUND, [(header::LOCATION, REDIRECT_TARGET)])
}

/// Latin-1 bytes for `José`, which are not visible ASCII.
pub const RAW_HEADER_VALUE: &[u8] = b"Jos\xe9";

async fn raw_header() -> Result<([(&'static str, HeaderValue); 1], &'static str), StatusCode> {
    let value =
        HeaderValue::from_bytes(RAW_HEADER_VALUE).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(([("x-mock-name", value)], "raw"))
}

/// Deterministic body of `len` bytes cycling through `a..=z`.
pub fn stream_body(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

async fn stream(Path(len): Path<usize>) -> Vec<u8> {
    stream_body(len)
}
