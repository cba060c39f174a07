use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::errors::WikiError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Application configuration and constants
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub template_dir: PathBuf,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            template_dir: PathBuf::from("tmpl"),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Read `WIKI_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, WikiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WikiError> {
        let defaults = Self::new();

        let port = match lookup("WIKI_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| WikiError::Config(format!("WIKI_PORT={}: {}", raw, e)))?,
            None => defaults.port,
        };

        Ok(Self {
            data_dir: lookup("WIKI_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            template_dir: lookup("WIKI_TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_dir),
            port,
            host: lookup("WIKI_HOST").unwrap_or(defaults.host),
        })
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let host = if self.host == "localhost" { DEFAULT_HOST } else { self.host.as_str() };
        let ip = host
            .parse::<IpAddr>()
            .map_err(|e| WikiError::Config(format!("WIKI_HOST={}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_original_layout() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.template_dir, PathBuf::from("tmpl"));
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn environment_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WIKI_PORT", "9090"),
            ("WIKI_HOST", "0.0.0.0"),
            ("WIKI_DATA_DIR", "/srv/wiki"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:9090");
        assert_eq!(config.data_dir, PathBuf::from("/srv/wiki"));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("WIKI_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, WikiError::Config(_)));
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let config = Config { host: "localhost".into(), ..Config::new() };
        assert_eq!(config.socket_addr().unwrap().ip().to_string(), "127.0.0.1");
    }
}
