//! Endpoint URI assembly.
//!
//! # Design
//! A `Uri` is parsed once into scheme, host and port, then re-rendered as
//! `scheme://host:port` + `prefix + path` whenever the path changes. The port
//! is always written out, even when it matches the scheme default. Parsing
//! never fails loudly: a malformed base is logged and the URL keeps its
//! previous (possibly empty) value.

use url::Url;

use crate::config::ConfigProvider;
use crate::error::Error;

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "80";
pub const DEFAULT_PREFIX: &str = "/api/v1";

/// Parsed `scheme://host:port` part of an endpoint.
#[derive(Debug, Clone)]
struct Base {
    scheme: String,
    host: String,
    port: u16,
    url: Url,
}

impl Base {
    fn parse(raw: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidUri {
            uri: raw.to_string(),
            reason,
        };

        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("{DEFAULT_SCHEME}://{raw}")
        };
        let url = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(invalid("missing host".to_string())),
        };
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port".to_string()))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port,
            url,
        })
    }

    fn render(&self, path: &str) -> String {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let mut url = self.url.clone();
        url.set_path(path);
        url.set_query(query);

        let mut rendered = format!(
            "{}://{}:{}{}",
            self.scheme,
            self.host,
            self.port,
            url.path()
        );
        if let Some(query) = url.query() {
            rendered.push('?');
            rendered.push_str(query);
        }
        rendered
    }
}

/// Endpoint URL of a request.
#[derive(Debug, Clone, Default)]
pub struct Uri {
    base: Option<Base>,
    url: String,
    path: String,
    prefix: String,
}

impl Uri {
    /// Build from an explicit host, port and path. No prefix is applied.
    ///
    /// `host` may carry its own `scheme://`; otherwise `http` is assumed.
    pub fn new(host: &str, port: u16, path: &str) -> Self {
        let mut uri = Self::default();
        uri.init(&format!("{host}:{port}"), path);
        uri
    }

    /// Build from the `services.<service>` section of `config`.
    ///
    /// Missing keys fall back to `http`, `127.0.0.1`, `80` and `/api/v1`.
    pub fn from_config(config: &dyn ConfigProvider, service: &str, path: &str) -> Self {
        let key = |param: &str| format!("services.{service}.{param}");

        let schema = config.get_or(&key("schema"), DEFAULT_SCHEME);
        let host = config.get_or(&key("host"), DEFAULT_HOST);
        let port = config.get_or(&key("port"), DEFAULT_PORT);

        let mut uri = Self {
            prefix: config.get_or(&key("prefix"), DEFAULT_PREFIX),
            ..Self::default()
        };
        uri.init(&format!("{schema}://{host}:{port}"), path);
        uri
    }

    fn init(&mut self, raw: &str, path: &str) {
        match Base::parse(raw) {
            Ok(base) => self.base = Some(base),
            Err(err) => tracing::error!(uri = %raw, error = %err, "failed to parse URI"),
        }
        self.change_path(path);
    }

    /// Full URL, or `""` if the base never parsed.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current path, prefix included.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replace the path with `prefix + path` and re-render the URL.
    pub fn change_path(&mut self, path: &str) {
        self.path = format!("{}{}", self.prefix, path);
        if let Some(base) = &self.base {
            self.url = base.render(&self.path);
            tracing::debug!(url = %self.url, "URI path changed");
        }
    }

    /// Values of query parameter `name`. Always empty.
    pub fn param_values(&self, _name: &str) -> Vec<String> {
        Vec::new()
    }

    /// Match the path against `expr`. Always `false`.
    pub fn matches(&mut self, _expr: &str) -> bool {
        false
    }

    /// Capture group `number` of the last `matches` call. Always `""`.
    pub fn sub_match(&self, _number: usize) -> &str {
        ""
    }

    /// Query parameters rendered as an SQL condition. Always `""`.
    pub fn to_sql_condition(&self) -> String {
        String::new()
    }
}
