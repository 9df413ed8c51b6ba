//! Configuration lookup for service endpoints.
//!
//! # Design
//! The URI builder needs four string settings per remote service, read from
//! keys shaped `services.<name>.{schema|host|port|prefix}`. Providers are
//! injected explicitly instead of living in a process-wide singleton, so the
//! client can be built against a figment-backed store in production and a
//! plain map in tests.

use std::collections::BTreeMap;
use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::value::Value;
use figment::Figment;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Environment prefix understood by `FigmentConfig::load`.
pub const ENV_PREFIX: &str = "APP__";

/// Keyed string lookup against a configuration store.
pub trait ConfigProvider {
    /// Value stored under the dotted `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// In-memory provider backed by a sorted map.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: BTreeMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigProvider for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Provider backed by a `figment::Figment`.
///
/// Scalars are rendered as strings, so `port: 443` in YAML reads as `"443"`.
/// Tables, arrays and missing keys read as absent.
#[derive(Debug, Clone)]
pub struct FigmentConfig {
    figment: Figment,
}

impl FigmentConfig {
    pub fn new(figment: Figment) -> Self {
        Self { figment }
    }

    /// Merge a YAML file with `APP__`-prefixed environment variables.
    ///
    /// Double underscores split nesting levels, so
    /// `APP__SERVICES__BILLING__HOST` overrides `services.billing.host`.
    /// A missing file contributes nothing.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let figment = Figment::new()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self { figment }
    }

    pub fn figment(&self) -> &Figment {
        &self.figment
    }

    /// Deserialize the value under the dotted `key` into `T`.
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T, Error> {
        Ok(self.figment.extract_inner(key)?)
    }
}

impl ConfigProvider for FigmentConfig {
    fn get(&self, key: &str) -> Option<String> {
        match self.figment.find_value(key).ok()? {
            Value::String(_, s) => Some(s),
            Value::Char(_, c) => Some(c.to_string()),
            Value::Bool(_, b) => Some(b.to_string()),
            Value::Num(_, n) => n
                .to_u128()
                .map(|v| v.to_string())
                .or_else(|| n.to_i128().map(|v| v.to_string()))
                .or_else(|| n.to_f64().map(|v| v.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn static_config_falls_back_to_default() {
        let mut config = StaticConfig::new();
        config.set("services.billing.host", "billing.local");
        assert_eq!(
            config.get_or("services.billing.host", "127.0.0.1"),
            "billing.local"
        );
        assert_eq!(config.get_or("services.billing.port", "80"), "80");
    }

    #[test]
    fn static_config_collects_from_pairs() {
        let config: StaticConfig = [("a.b", "1"), ("a.c", "2")].into_iter().collect();
        assert_eq!(config.get("a.c").as_deref(), Some("2"));
        assert_eq!(config.get("a.d"), None);
    }

    #[test]
    fn figment_reads_yaml_scalars_as_strings() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "service.yaml",
                r#"
services:
  billing:
    schema: https
    host: billing.example.com
    port: 8443
    prefix: /v2
    secure: true
"#,
            )?;
            let config = FigmentConfig::load("service.yaml");
            assert_eq!(config.get("services.billing.schema").as_deref(), Some("https"));
            assert_eq!(config.get("services.billing.port").as_deref(), Some("8443"));
            assert_eq!(config.get("services.billing.secure").as_deref(), Some("true"));
            assert_eq!(config.get("services.billing"), None);
            assert_eq!(config.get("services.orders.host"), None);
            Ok(())
        });
    }

    #[test]
    fn figment_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("service.yaml", "services:\n  billing:\n    host: from-file\n")?;
            jail.set_env("APP__SERVICES__BILLING__HOST", "from-env");
            let config = FigmentConfig::load("service.yaml");
            assert_eq!(config.get("services.billing.host").as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn figment_extracts_typed_sections() {
        #[derive(Debug, serde::Deserialize)]
        struct Service {
            host: String,
            port: u16,
        }

        Jail::expect_with(|jail| {
            jail.create_file(
                "service.yaml",
                "services:\n  billing:\n    host: billing.local\n    port: 9000\n",
            )?;
            let config = FigmentConfig::load("service.yaml");
            let service: Service = config.extract("services.billing").unwrap();
            assert_eq!(service.host, "billing.local");
            assert_eq!(service.port, 9000);

            let err = config.extract::<Service>("services.orders").unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn figment_missing_file_is_empty() {
        Jail::expect_with(|_jail| {
            let config = FigmentConfig::load("absent.yaml");
            assert_eq!(config.get_or("services.billing.host", "127.0.0.1"), "127.0.0.1");
            Ok(())
        });
    }
}
