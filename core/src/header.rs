//! Header container for outbound and inbound HTTP headers.
//!
//! # Design
//! Names are case-sensitive keys in a `BTreeMap`, so each name appears once
//! and the wire list comes out in a stable order. An `Output` container
//! rebuilds its whole wire list after every mutation; the client hands that
//! list to the transport session as-is. `Input` containers are filled line
//! by line from the transport's header hook and never build a wire list.

use std::collections::BTreeMap;

/// Which side of the exchange a header set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Headers received with a response.
    Input,
    /// Headers sent with a request.
    Output,
}

#[derive(Debug, Clone)]
pub struct Header {
    direction: Direction,
    fields: BTreeMap<String, String>,
    wire: Vec<String>,
}

impl Header {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            fields: BTreeMap::new(),
            wire: Vec::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Stored value for `name`, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Insert or overwrite `name`.
    ///
    /// Outbound names that are empty or contain a colon cannot be rendered as
    /// a `Name: Value` line; they are logged and ignored.
    pub fn set(&mut self, name: &str, value: &str) {
        if self.direction == Direction::Output && (name.is_empty() || name.contains(':')) {
            tracing::warn!(name, "ignoring outbound header with an invalid name");
            return;
        }
        self.fields.insert(name.to_string(), value.to_string());

        if self.direction == Direction::Output {
            self.wire = self
                .fields
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
        }
    }

    /// Parse one raw `Name: Value` line and store it.
    ///
    /// Splits on the first colon, drops a single leading space from the value
    /// and any trailing CR/LF. Lines without a colon are ignored.
    pub fn set_line(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        let value = value.strip_prefix(' ').unwrap_or(value);
        let value = value.trim_end_matches(['\r', '\n']);
        self.set(name, value);
    }

    /// The `Name: Value` list last registered for the transport.
    ///
    /// Always empty for `Input` headers.
    pub fn wire_lines(&self) -> &[String] {
        &self.wire
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn get_returns_latest_value() {
        let mut header = Header::new(Direction::Input);
        header.set("Accept", "text/plain");
        header.set("Accept", "application/json");
        assert_eq!(header.get("Accept"), "application/json");
        assert_eq!(header.len(), 1);
    }

    #[test]
    fn missing_name_is_empty_string() {
        let header = Header::new(Direction::Output);
        assert_eq!(header.get("X-Missing"), "");
        assert!(!header.contains("X-Missing"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut header = Header::new(Direction::Input);
        header.set("ETag", "abc");
        assert_eq!(header.get("etag"), "");
        assert_eq!(header.get("ETag"), "abc");
    }

    #[test]
    fn output_wire_list_has_one_entry_per_name() {
        let mut header = Header::new(Direction::Output);
        header.set("X-B", "1");
        header.set("X-A", "2");
        header.set("X-B", "3");
        assert_eq!(header.wire_lines(), ["X-A: 2", "X-B: 3"]);
    }

    #[test]
    fn input_headers_do_not_build_a_wire_list() {
        let mut header = Header::new(Direction::Input);
        header.set("Server", "test");
        assert!(header.wire_lines().is_empty());
    }

    #[test]
    fn set_line_splits_on_first_colon() {
        let mut header = Header::new(Direction::Input);
        header.set_line("Location: http://example.com:8080/x\r\n");
        assert_eq!(header.get("Location"), "http://example.com:8080/x");
    }

    #[test]
    fn set_line_strips_only_one_leading_space() {
        let mut header = Header::new(Direction::Input);
        header.set_line("X-Pad:   padded\n");
        assert_eq!(header.get("X-Pad"), "  padded");
        header.set_line("X-Tight:tight");
        assert_eq!(header.get("X-Tight"), "tight");
    }

    #[test]
    fn set_line_without_colon_is_ignored() {
        let mut header = Header::new(Direction::Output);
        header.set_line("HTTP/1.1 200 OK\r\n");
        header.set_line("\r\n");
        assert!(header.is_empty());
        assert!(header.wire_lines().is_empty());
    }

    #[test]
    fn set_line_on_output_rebuilds_wire_list() {
        let mut header = Header::new(Direction::Output);
        header.set_line("Authorization: Bearer token\r\n");
        assert_eq!(header.wire_lines(), ["Authorization: Bearer token"]);
    }

    #[test]
    fn iter_yields_sorted_pairs() {
        let mut header = Header::new(Direction::Input);
        header.set("b", "2");
        header.set("a", "1");
        let pairs: Vec<_> = header.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[traced_test]
    #[test]
    fn outbound_name_with_colon_is_rejected() {
        let mut header = Header::new(Direction::Output);
        header.set("X-Ok", "1");
        header.set("A:B", "v");
        header.set("", "empty");
        assert_eq!(header.wire_lines(), ["X-Ok: 1"]);
        assert!(!header.contains("A:B"));
        assert!(logs_contain("ignoring outbound header with an invalid name"));
    }

    #[test]
    fn inbound_names_are_not_validated() {
        let mut header = Header::new(Direction::Input);
        header.set("", "empty");
        assert_eq!(header.get(""), "empty");
    }
}
