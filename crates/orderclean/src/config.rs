use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use orderclean_core::schema::PREVIEW_ROWS;

const BIND_ADDR_VAR: &str = "ORDERCLEAN_BIND_ADDR";
const MAX_UPLOAD_BYTES_VAR: &str = "ORDERCLEAN_MAX_UPLOAD_BYTES";
const PREVIEW_ROWS_VAR: &str = "ORDERCLEAN_PREVIEW_ROWS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub preview_rows: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_upload_bytes: 25 * 1024 * 1024,
            preview_rows: PREVIEW_ROWS,
        }
    }
}

impl ServerConfig {
    /// Reads the server settings from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parse_var(&lookup, BIND_ADDR_VAR, defaults.bind_addr)?,
            max_upload_bytes: parse_var(&lookup, MAX_UPLOAD_BYTES_VAR, defaults.max_upload_bytes)?,
            preview_rows: parse_var(&lookup, PREVIEW_ROWS_VAR, defaults.preview_rows)?,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| anyhow!("{key}={raw:?} is invalid: {err}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).expect("defaults are valid");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.preview_rows, 20);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (MAX_UPLOAD_BYTES_VAR, " 1024 "),
            (PREVIEW_ROWS_VAR, "5"),
        ]))
        .expect("overrides are valid");

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = ServerConfig::from_lookup(lookup_from(&[(PREVIEW_ROWS_VAR, "many")]))
            .expect_err("non-numeric preview rows");
        assert!(err.to_string().contains(PREVIEW_ROWS_VAR), "{err}");
    }
}
